use crate::domain::skill::Skill;

pub(crate) const TEST_AUTHOR_INSTRUCTION: &str = "You are an expert IELTS test creator. Create high-quality, challenging academic content suitable for university-bound students.";

pub(crate) fn build_test_prompt(skill: Skill, count: u32) -> String {
    match skill {
        Skill::Reading => format!(
            "Generate an Academic IELTS Reading test with exactly {count} questions based on a new academic passage of about 600-800 words on a science, history or sociology topic. \
Put the passage in 'introText'. Mix question types: multiple-choice (with 'options'), boolean (True/False/Not Given) and short text answers. \
Give every question a unique 'id' and its 'correctAnswer'."
        ),
        Skill::Listening => format!(
            "Generate an Academic IELTS Listening test with exactly {count} questions. \
First write the transcript of a conversation or lecture of about five minutes; 'introText' MUST contain the full transcript. \
Then write questions answerable from the transcript, each with a unique 'id', a 'type' and its 'correctAnswer'."
        ),
        Skill::Writing => "Generate an Academic IELTS Writing test as 'tasks' with exactly 2 entries: \
Task 1 describes a hypothetical chart or graph given as a text description (minimum 150 words), \
Task 2 is an essay prompt (minimum 250 words). Set 'minWords' for each task."
            .to_string(),
        Skill::Speaking => "Generate an Academic IELTS Speaking test as 'parts' with exactly 3 entries: \
Part 1 (Introduction and Interview), Part 2 (Long Turn with a cue card), Part 3 (Discussion). \
List the questions or prompts the examiner asks in each part."
            .to_string(),
    }
}

pub(crate) fn build_evaluation_prompt(
    skill: Skill,
    test_json: &str,
    responses_json: &str,
) -> String {
    let criteria = skill.criteria().join(", ");
    format!(
        "You are a strict IELTS Senior Examiner. Evaluate this student's {skill} test.\n\
\n\
Test content:\n{test_json}\n\
\n\
Student responses:\n{responses_json}\n\
\n\
Task:\n\
1. Grade the responses against official IELTS Academic standards (band 0-9).\n\
2. Provide a breakdown for EXACTLY these 4 criteria, using these names: {criteria}.\n\
3. For each criterion give a score (0-9), feedback explaining it, and one specific improvement tip.\n\
4. Give an overall band score: the average of the criteria rounded to the nearest half band.\n\
5. Write a general summary and a step-by-step improvement plan."
    )
}

pub(crate) fn build_word_definition_prompt(word: &str) -> String {
    format!(
        "Define the academic word \"{word}\" for an IELTS student. \
Give a clear, concise definition, one sophisticated example sentence showing its use in an essay, and 2-3 synonyms."
    )
}

pub(crate) fn build_essay_analysis_prompt(question: &str, essay: &str) -> String {
    format!(
        "Analyze the following IELTS Band 9 essay sample.\n\
Question: {question}\n\
Essay: {essay}\n\
\n\
Describe the writing techniques used:\n\
1. Structure: how the argument is built across introduction, body paragraphs and conclusion.\n\
2. Key vocabulary: 5-7 sophisticated words or phrases used in context.\n\
3. Grammar highlights: notable complex sentence structures.\n\
4. Coherence: how ideas are linked."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_count_reaches_reading_and_listening_prompts() {
        assert!(build_test_prompt(Skill::Reading, 25).contains("exactly 25 questions"));
        assert!(build_test_prompt(Skill::Listening, 15).contains("exactly 15 questions"));
    }

    #[test]
    fn test_writing_prompt_ignores_count() {
        assert_eq!(
            build_test_prompt(Skill::Writing, 15),
            build_test_prompt(Skill::Writing, 50)
        );
    }

    #[test]
    fn test_evaluation_prompt_names_skill_criteria() {
        let prompt = build_evaluation_prompt(Skill::Speaking, "{}", "[]");
        assert!(prompt.contains(
            "Fluency & Coherence, Lexical Resource, Grammatical Range & Accuracy, Pronunciation"
        ));
        assert!(prompt.contains("speaking test"));
    }
}
