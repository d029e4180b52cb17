//! Static study material: academic word lists and Band 9 essay samples.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct WordList {
    pub name: &'static str,
    pub words: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct EssaySample {
    pub id: u32,
    pub question: &'static str,
    pub answer: &'static str,
}

pub const WORD_LISTS: &[WordList] = &[
    WordList {
        name: "List 1",
        words: &[
            "achieve", "administration", "affect", "analysis", "approach", "appropriate",
            "area", "aspects", "assistance", "assume", "authority", "available", "benefit",
            "category", "community", "complex", "concerning", "conclusion", "conduct",
            "consequence", "consistent", "constitutional", "consumer", "context", "create",
            "culture", "data", "definition", "destructive", "discovery", "distinction",
            "economic", "element", "environment", "error", "equation", "establish", "estimate",
            "evaluation", "evidence", "factors", "feature", "final", "financial", "focus",
            "function", "global", "identify", "impact", "income", "indicate", "individual",
            "injury", "investment", "involve", "issue", "item", "legal", "maintenance", "major",
            "media", "method", "modern", "normal", "obtain", "restrict", "occur",
            "participation", "percent", "period", "policy", "positive", "potential", "previous",
            "primary", "process", "purchase", "range", "recent", "region", "regulations",
            "relevant", "require", "research", "resident", "resources", "response", "sector",
            "security", "significant", "similar", "solution", "source", "specific", "strategy",
            "structure", "theory", "threat", "traditional", "transport",
        ],
    },
    WordList {
        name: "List 2",
        words: &[
            "access", "activity", "alter", "alternative", "amendment", "annual", "apparent",
            "application", "approximate", "artificial", "attitude", "aware", "capacity",
            "challenge", "circumstance", "comment", "communication", "concentration",
            "conflict", "considerable", "constant", "contact", "contribution", "core",
            "correspond", "criteria", "cycle", "debate", "decline", "deduction", "demonstrate",
            "despite", "dimension", "domestic", "dominant", "emerge", "emphasis", "enable",
            "energy", "enforcement", "ensure", "equivalent", "evolution", "exclude", "exposure",
            "external", "facilitate", "fundamental", "funds", "generation", "hence",
            "hypothesis", "illustrate", "image", "immigration", "implement", "initial",
            "integration", "layer", "legislation", "location", "logic", "marginal", "maximum",
            "mechanism", "medical", "mental", "modification", "negative", "network",
            "occupation", "option", "orientation", "outcome", "overall", "parallel",
            "perspective", "philosophy", "precise", "predict", "project", "promote",
            "proportion", "psychology", "reaction", "remove", "resolution", "specify",
            "stability", "subsequent", "sufficient", "summary", "supply", "task", "technique",
            "technology", "transition", "trend", "version", "volume",
        ],
    },
    WordList {
        name: "List 3",
        words: &[
            "abstract", "accurate", "acknowledge", "adaptation", "adequate", "adjust", "adult",
            "advocate", "aid", "attribute", "author", "brief", "capable", "civil", "classical",
            "comprehensive", "contrary", "coordination", "couple", "decades", "definite",
            "deny", "discrimination", "disposal", "diversity", "domain", "dynamic", "eliminate",
            "equipment", "estate", "exceed", "expansion", "expert", "fees", "flexibility",
            "foundation", "gender", "global", "grade", "guarantee", "identical", "ignorance",
            "imply", "incentive", "incorporated", "index", "infrastructure", "inhibition",
            "innovation", "instance", "instruction", "intelligence", "interact", "interval",
            "investigation", "isolated", "justification", "lecture", "liberal", "migration",
            "minimum", "monitoring", "motivation", "neutral", "obvious", "overseas",
            "parameter", "phenomenon", "prohibit", "publish", "pursue", "rational", "recovery",
            "reject", "release", "reveal", "role", "satisfy", "scope", "sequence", "simulation",
            "solely", "somewhat", "status", "stress", "style", "substitution", "successive",
            "survey", "survive", "sustainable", "symbolic", "topic", "trace", "transformation",
            "ultimate", "underline", "unique", "utility", "visible",
        ],
    },
    WordList {
        name: "List 4",
        words: &[
            "accommodation", "accompany", "advance", "analogous", "anticipate", "appendix",
            "appreciate", "arbitrary", "assure", "automatically", "behalf", "bias", "cease",
            "chart", "clarity", "coherence", "coincide", "commodity", "confirm", "contemporary",
            "contradict", "controversy", "conversely", "cooperate", "crucial", "currency",
            "denote", "detect", "deviation", "device", "devote", "differentiation", "diminish",
            "displacement", "display", "distorted", "dramatic", "duration", "ethical",
            "eventually", "exhibit", "explicit", "exploitation", "extract", "federal",
            "fluctuations", "format", "founded", "guidelines", "highlighted", "implicit",
            "incompatible", "induce", "inevitably", "inherent", "intensity", "intermediate",
            "internal", "manual", "mature", "medium", "military", "mutual", "norms", "notion",
            "nuclear", "objective", "paragraph", "passive", "perceive", "portion", "precede",
            "predominantly", "priority", "prospect", "qualitative", "radical", "random",
            "reinforce", "relax", "revision", "revolution", "scenario", "schedule", "sphere",
            "suspended", "target", "team", "temporary", "tension", "theme", "thereby",
            "uniform", "validity", "vehicle", "via", "violation", "virtual", "vision",
            "widespread",
        ],
    },
    WordList {
        name: "List 5",
        words: &[
            "abandon", "abate", "abrupt", "accumulation", "acquisition", "adjacent",
            "aggregate", "albeit", "ambiguous", "ancestor", "assembly", "assessment", "assign",
            "attain", "avert", "coal", "collapse", "colleagues", "combat", "commit", "compile",
            "complement", "comprise", "conceive", "concurrent", "confined", "conform",
            "confuse", "consciousness", "convinced", "creditable", "deceive", "depression",
            "derive", "distribution", "divergent", "doubt", "drastic", "election", "empirical",
            "encounter", "enhance", "enormous", "entirely", "entrepreneur", "erosion",
            "forbearance", "forthcoming", "frustration", "goal", "homogenous", "inclination",
            "indulge", "infer", "initiative", "insight", "inspection", "integral",
            "intervention", "intrinsic", "invoke", "justify", "likewise", "link", "manage",
            "manipulation", "merge", "nonetheless", "notwithstanding", "odd", "ongoing",
            "overlap", "persistent", "pose", "possess", "preliminary", "presumption", "ratio",
            "refine", "relate", "reluctant", "restore", "restraint", "rigid", "route",
            "sacrifice", "scale", "so-called", "straightforward", "subordinate", "substantiate",
            "supplementary", "sympathy", "termination", "transmission", "undergo", "unify",
            "vital", "voluntary", "whereby",
        ],
    },
];

pub const ESSAY_SAMPLES: &[EssaySample] = &[
    EssaySample {
        id: 1,
        question: "Should a city try to preserve its old, historic buildings or destroy them and replace them with modern buildings? Use specific reasons and examples to support your opinion.",
        answer: "Whether cities should preserve historic buildings or demolish them to make space for modern developments is a topic of considerable debate. I strongly believe that maintaining old structures is far more beneficial, as they carry cultural value and can bring long-term economic advantages.\n\nOne major reason to preserve historic buildings is that they represent a city’s cultural identity. These structures reflect architectural styles, traditions and significant events from different periods of history. When cities destroy them, they risk losing part of their heritage that cannot be replaced. For example, many European cities, such as Rome and Prague, attract millions of visitors every year precisely because they have maintained their historic centres. These buildings create a unique atmosphere that modern skyscrapers cannot replicate. Therefore, preserving old architecture helps maintain a sense of continuity and identity for future generations.\n\nAnother strong argument for preservation is the economic value that historic sites generate. Tourism is one of the largest global industries, and travellers often choose destinations based on their cultural and historical attractions. Renovating old buildings and converting them into museums, hotels or cultural centres not only protects heritage but also supports local businesses and creates employment. Additionally, many historic buildings are structurally sound and can be modernised internally, making them both functional and environmentally sustainable. In contrast, demolishing structures and constructing new ones often requires far more energy and resources, contributing to environmental waste.\n\nIn conclusion, cities should prioritise the preservation of historic buildings because they provide cultural identity and long-term economic benefits. While modern development is important, it should not come at the expense of irreplaceable heritage that enriches both local residents and visitors.",
    },
    EssaySample {
        id: 2,
        question: "An increasing number of schools provide tablets and laptop computers for students to use in school, replacing books and other printed materials like exams and assignments. What are the advantages and disadvantages of this trend?",
        answer: "It is argued that untouched lands must be investigated because of the increasing necessity for energy sources worldwide. This essay totally disagrees with this statement. I believe that exploring new areas in order to gain access to oil and gas can have detrimental impacts on the environment and cause more dependency on fossil fuels.\n\nExploring new territories for fossil-gaining purposes can worsen significantly the biodiversity of the Earth. Aspiring to acquire temporary power resources, a vast landscape must be destroyed, chopping down the hectares of wood and releasing hazardous gas emissions into the atmosphere. Furthermore, it may cause other catastrophic issues such as Global warming, by depriving remaining trees on the Earth and increasing air pollution. For example, provided statistics by Nazarbayev University exploiting lands excessively between 1970 and 1996, Kazakhstan's climate worsened by 35% by degrading air quality and causing the extinction of local species of fauna and flora.\n\nHaving exploited fossil fuels from undeveloped areas, citizens can grow their dependency by trying to accomplish urgent necessities. Not only does the exploration of new lands make people eager to consume increasingly year by year, but it also may lead to a neglectful approach to the environment. Instead of inventing and implementing eco-friendly sustainable energy, humans generally rush to find a temporary salvation. For instance, a study conducted by the World Nature Conservancy proves that the opening of new gas and oil fields is gaining a tendency, with an increasing figure at about 9% each year, and causing the neglection to the invention of alternative power sources.\n\nIn conclusion, though the demand for traditional energy resources is growing, it mustn't be the reason to exploit undeveloped areas, as this can become a root of disaster to the nature and reliance of humanity only on these sources.",
    },
    EssaySample {
        id: 3,
        question: "Some people believe that planning for the future is a waste of time because they think that focusing on the present is more important. To what extent do you agree or disagree.",
        answer: "It is argued that making arrangements for the future is useless as focusing on your current life is more crucial. This essay totally disagrees with that statement. I believe that planning helps people to achieve long-term success and prevent potential unexpected risks.\n\nIndividuals with planned future actions are capable of achieving heights down the line. Not only do they aspire to employ all the opportunities they have to accomplish goals, but they can also take control over their present actions. Ambitions with organised steps lead to personal growth and fulfilment. For example, provided statistics by Harvard University show that students with a prearranged future exhibited advancements in their physical, emotional, financial and social spheres 45% higher than those without certain purposes.\n\nAdditionally, when they organise their way of life, it will provide a chance to notice and avert possible challenges or negative changes in the distant horizon. By taking a proactive approach to their lifestyle, humans can maintain the required daily routines, skills and strategic thinking in the present moment. Furthermore, it assists in acquiring a mindful and rational mindset towards life changes. For instance, according to a study conducted by the scientists of the International Organisation For Human Resources, individuals with desired accomplishments are 23% less likely to have unpleasant outcomes. Even though they encounter difficulties, they probably will not cause them as high a level of stress and anxiety as the other group.\n\nIn conclusion, being purposeful in terms of their forthcoming plans can result in outstanding results for people and mitigate unanticipated threats on their further path.",
    },
    EssaySample {
        id: 4,
        question: "Some people think that government funding for schools should be spent on science subjects rather than on other subjects. To what extent do you agree or disagree?",
        answer: "There is no denying that governments should allocate funds to education. Some people look upon expenditures spent on science as a better policy, compared to other subjects. As far as I am concerned, I am strongly opposed to this argument, and the reasons will be thoroughly explained as follows.\n\nTo begin with, not all students are interested in science, so some groups of people will be treated unfairly if the authorities fail to spend money on diverse subjects. That is to say, those who are passionate about other fields like arts or literature will be underserved. For example, I have been dreaming about pursuing a career as a professional dancer since I was a child. However, decades ago, the Taiwanese government implemented regulations that maintained financial support only for science and technology subjects. As a result, I had no option but to give up my aspiration due to lacking enough savings for further advanced training lessons.\n\nIt is widely accepted that individuals tend to select a major catering to the job market; therefore, there is a risk of an imbalance in human resources in the future. According to a study from National Taiwan University, about 70 per cent of job opportunities in Taiwan are related to semiconductors and software services, which results in the majority of Taiwanese teenagers preferring to learn physics, mathematics, and programming. On the other hand, businesses like publishers or restaurants are now facing challenges in not being able to hire enough well-trained employees.\n\nIn conclusion, based on the aforementioned, funding for schools should be distributed to various subjects for the sake of benefiting every student and protecting every business.",
    },
    EssaySample {
        id: 5,
        question: "Schools are no longer necessary, because children can get so much information available through Internet, and they can study just as well at home. What extent do you agree or disagree?",
        answer: "In this modern world, whether or not the existence of schools is necessary has been a widely debated issue. Some people believe that schools are no longer a must due to the prevalence of the Internet nowadays. In this essay, I will explain why I strongly disagree with this statement.\n\nAlthough being able to acquire information through the Internet, children might be addicted to video games or social media, both of which distract their studies badly. Some of them even suffer from eye strain and nearsightedness because of prolonged use of screens without taking breaks properly. Last but not least, the majority of children tend to develop a sedentary lifestyle, causing them to risk chronic diseases such as obesity and hypertension. In contrast, schools typically have strict regulations regarding surfing the Internet and courses requiring students to do outdoor exercises, so the above concerns can be easily solved.\n\nBesides learning knowledge, schools provide other basic educational resources to children in my opinion. First of all, when individuals are involved in group activities or discussions, they will learn about communication skills, teamwork abilities, and time management. In addition, only teachers, instead of computers, can address students' learning problems and inspire them to build confidence to face the challenges. Also, children sometimes have questions about their future careers, and suggestions from teachers are much more meaningful than anonymous Internet users.\n\nIn conclusion, even if the Internet enables people to learn on their own, I believe that schools still play a crucial role in society and are necessary for providing social experiences and guiding mentors.",
    },
    EssaySample {
        id: 6,
        question: "Some people think that to lead a successful life, a university degree is important. Others believe that this is no longer true nowadays. Discuss both views and give your opinion.",
        answer: "In our modern era, some people hold the view that to guarantee a prosperous career and stable life, a degree is needed. While other folks believe that in recent generations, success in life can be achieved in multiple ways and forms. In this essay, I will discuss each perspective and give my opinion.\n\nOn the one hand, there are specific fields that need degrees to succeed, such as medicine, engineering, law, and so on. Therefore, to achieve greatness in these domains, a person should have a major in college and study for it to be able to join these categories in the first place. For example, to become a doctor, studies show that completing a medical degree and passing a licensing exam is essential for practising medicine.\n\nOn the other hand, a successful career is not confined to studying or having degrees in our modern generation. This is because when a person launches a brand or starts a business, they can rely on their dedication, creativity, hard work, and vision to project management and lead to a successful business. Thereby, these types of fields don't require professional titles to thrive as much as they require mental abilities and innovative thinking. To illustrate, recent studies have shown that most of the successful rich people build their careers on businesses and companies they created, even though their major in college was completely different from business.\n\nTo sum up, I personally believe that to build a life of achievement, a formal education is not needed in a number of ways, like managing projects or establishing a personal brand. However, there are some domains that require an academic qualification to create a fruitful professional path.",
    },
];

pub fn word_list(name: &str) -> Option<&'static WordList> {
    WORD_LISTS
        .iter()
        .find(|list| list.name.eq_ignore_ascii_case(name.trim()))
}

pub fn essay_sample(id: u32) -> Option<&'static EssaySample> {
    ESSAY_SAMPLES.iter().find(|sample| sample.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_word_lists_without_blank_entries() {
        assert_eq!(WORD_LISTS.len(), 5);
        for list in WORD_LISTS {
            assert!(!list.words.is_empty(), "{} is empty", list.name);
            assert!(list.words.iter().all(|word| !word.trim().is_empty()));
        }
        assert!(word_list("list 3").is_some());
    }

    #[test]
    fn test_essay_samples_have_unique_ids() {
        assert_eq!(ESSAY_SAMPLES.len(), 6);
        for sample in ESSAY_SAMPLES {
            assert_eq!(essay_sample(sample.id).map(|s| s.question), Some(sample.question));
            assert!(sample.answer.contains("\n\n"));
        }
    }
}
