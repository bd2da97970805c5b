use super::JSON_ONLY;

pub const TASK1_TOPICS: &[&str] = &[
    "Family reunion planning",
    "Apartment rental inquiry",
    "Medical appointment confirmation",
    "Birthday party invitation",
    "Work schedule changes",
    "Travel arrangements",
    "Community event announcement",
    "School parent-teacher meeting",
    "Volunteer opportunity notice",
    "Job interview scheduling",
    "Moving services inquiry",
    "Hockey tournament registration",
];

pub const TASK1_CONTEXT_TYPES: &[&str] = &[
    "daily_life",
    "family_events",
    "work_related",
    "community_activities",
    "personal_services",
    "educational",
    "recreational",
];

pub const TASK2_TOPICS: &[&str] = &[
    "Climate change impacts in Canada",
    "Indigenous Canadian culture and traditions",
    "Canadian healthcare system",
    "Wildlife conservation in Canada",
    "Renewable energy in Canada",
    "Canadian transportation systems",
    "Urban planning in Canadian cities",
    "Sustainable tourism in Canada",
    "Canadian multicultural society",
];

pub const TASK3_TOPICS: &[&str] = &[
    "History of Canadian Confederation",
    "Canadian wildlife migration patterns",
    "Canadian space research programs",
    "History of Canadian railways",
    "Canadian marine ecosystem protection",
    "Canadian agricultural innovations",
    "History of Canadian broadcasting",
    "Canadian Arctic sovereignty issues",
];

pub const TASK4_TOPICS: &[&str] = &[
    "Remote work vs office work debate",
    "Electric vehicles vs traditional cars",
    "Online learning vs classroom education",
    "Public transportation funding debates",
    "Housing affordability crisis",
    "Minimum wage increase debates",
    "Urban development vs green spaces",
    "Artificial intelligence in workplace",
    "Senior care system reforms",
];

const QUESTION_SCHEMA: &str = r#"{
      "question_id": "q1",
      "question_text": "...",
      "question_type": "multiple_choice",
      "options": ["A. ...", "B. ...", "C. ...", "D. ..."],
      "correct_answer": "A",
      "explanation": "..."
    }"#;

pub fn task1_prompt(topic: &str, context_type: &str) -> String {
    format!(
        r#"You are an expert CELPIP test creator familiar with Canadian daily life.

Create a CELPIP Reading Task 1 (Reading Correspondence) about "{topic}" in a {context_type} context.

Structure:
- An email or letter of 200-250 words with concrete names, dates, times and places.
- A reply to that message of about 150 words.
- Exactly 11 multiple-choice questions. Questions 1-6 test comprehension of the original message.
  Questions 7-11 are blanks in the reply, each with four options that complete it in context.

Use this JSON structure:
{{
  "task_id": "reading_task1_<unique>",
  "passage": {{
    "passage_id": "passage_1",
    "title": "Email subject",
    "content": "Full message text",
    "passage_type": "email",
    "context": "One sentence describing the situation"
  }},
  "reply_passage": {{ "content": "Reply text with numbered blanks like ___(7)___" }},
  "questions": [
    {QUESTION_SCHEMA}
  ],
  "time_limit_minutes": 11,
  "difficulty_level": "intermediate"
}}

{JSON_ONLY}"#
    )
}

pub fn task2_prompt(topic: &str) -> String {
    format!(
        r#"You are an expert CELPIP test creator.

Create a CELPIP Reading Task 2 (Reading to Apply a Diagram) on the topic "{topic}".

Structure:
- An email of 250-300 words that refers to a diagram (schedule, map, chart or price list).
- A text description of that diagram with every detail the questions rely on.
- Exactly 8 multiple-choice questions. Questions 1-5 are blanks in the email answered with the diagram.
  Questions 6-8 test comprehension of the email.

Use this JSON structure:
{{
  "task_id": "reading_task2_<unique>",
  "passage": {{
    "passage_id": "passage_1",
    "title": "...",
    "content": "Email text with numbered blanks",
    "passage_type": "informational",
    "topic": "{topic}",
    "word_count": 275
  }},
  "diagram_description": "Detailed description of the diagram",
  "questions": [
    {QUESTION_SCHEMA}
  ],
  "time_limit_minutes": 9,
  "question_count": 8
}}

{JSON_ONLY}"#
    )
}

pub fn task3_prompt(topic: &str) -> String {
    format!(
        r#"You are an expert CELPIP test creator.

Create a CELPIP Reading Task 3 (Reading for Information) on the topic "{topic}".

Structure:
- An informational article of about 400 words split into four labelled paragraphs A, B, C and D.
- Exactly 9 statements. Each statement matches one paragraph (A-D), or E if it matches none.
  Use E at least once.

Use this JSON structure:
{{
  "task_id": "reading_task3_<unique>",
  "passage": {{
    "passage_id": "passage_1",
    "title": "...",
    "paragraph_a": "...",
    "paragraph_b": "...",
    "paragraph_c": "...",
    "paragraph_d": "...",
    "passage_type": "informational",
    "topic": "{topic}",
    "word_count": 400
  }},
  "questions": [
    {{ "question_id": "q1", "statement": "...", "correct_answer": "B", "explanation": "..." }}
  ],
  "time_limit_minutes": 10,
  "question_count": 9
}}

{JSON_ONLY}"#
    )
}

pub fn task4_prompt(topic: &str) -> String {
    format!(
        r#"You are an expert CELPIP test creator.

Create a CELPIP Reading Task 4 (Reading for Viewpoints) on the topic "{topic}".

Structure:
- A news article of about 450 words presenting at least two viewpoints.
- A reader's comment of about 120 words responding to the article, with 5 numbered blanks.
- Exactly 10 questions: 5 "article" questions with four options about the viewpoints,
  then 5 "comment" questions that fill the blanks (set blank_position 1-5).

Use this JSON structure:
{{
  "task_id": "reading_task4_<unique>",
  "passage": {{
    "passage_id": "passage_1",
    "title": "...",
    "article_content": "...",
    "comment_content": "Comment with ___(1)___ style blanks",
    "passage_type": "news_viewpoints",
    "topic": "{topic}",
    "word_count": 570
  }},
  "questions": [
    {{
      "question_id": "q1",
      "question_text": "...",
      "question_type": "article",
      "options": ["A. ...", "B. ...", "C. ...", "D. ..."],
      "correct_answer": "A",
      "explanation": "...",
      "blank_position": null
    }}
  ],
  "time_limit_minutes": 13,
  "question_count": 10
}}

{JSON_ONLY}"#
    )
}
