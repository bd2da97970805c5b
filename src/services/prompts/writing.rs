use super::{bullet_list, JSON_ONLY};
use crate::models::writing::{EmailScenario, Survey, WORD_COUNT_MAX, WORD_COUNT_MIN};

/// Context heading and the concrete situations filed under it.
pub const TASK1_SCENARIOS: &[(&str, &[&str])] = &[
    (
        "Housing/Accommodation Issues",
        &[
            "Elevator in apartment building out of service for over a week",
            "Heating system malfunction in winter apartment",
            "Noisy neighbors disrupting sleep in condo building",
            "Water damage from upstairs apartment unit",
            "Complaint about delayed snow removal in parking lot",
        ],
    ),
    (
        "Travel and Tourism",
        &[
            "Inquiring about northern lights tour package to Yellowknife",
            "Requesting information about Banff National Park hiking tours",
            "Planning ski trip to Whistler for winter holidays",
            "Booking guided tour of Parliament Hill in Ottawa",
        ],
    ),
    (
        "Workplace",
        &[
            "Requesting time off for a family event",
            "Proposing a flexible schedule to a manager",
            "Thanking a coworker who covered a shift",
            "Reporting broken equipment in the office",
        ],
    ),
    (
        "Community and Services",
        &[
            "Complaint about a delayed online order",
            "Asking the city about a new recycling schedule",
            "Inviting neighbours to a street clean-up day",
            "Requesting a refund for a cancelled fitness class",
        ],
    ),
];

pub const PURPOSES: &[&str] = &[
    "complaint",
    "inquiry",
    "request",
    "invitation",
    "apology",
    "congratulations",
    "information seeking",
    "follow-up",
    "suggestion",
    "thank you",
    "notification",
    "cancellation",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct SurveyTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub question: &'static str,
    pub options: [&'static str; 2],
}

pub const TASK2_SURVEYS: &[SurveyTemplate] = &[
    SurveyTemplate {
        title: "Online vs. Traditional Learning",
        description: "A Canadian education organization is studying learning preferences.",
        question: "Which learning method do you prefer for professional development?",
        options: [
            "Online courses with flexible scheduling",
            "Traditional classroom instruction with face-to-face interaction",
        ],
    },
    SurveyTemplate {
        title: "Educational Technology",
        description: "A school board is investing in new learning technologies.",
        question: "Which technology investment would most improve student learning?",
        options: [
            "Individual tablets for each student",
            "Interactive smart boards in every classroom",
        ],
    },
    SurveyTemplate {
        title: "Community Recreation",
        description: "Your city has funding for one new recreation facility.",
        question: "Which facility should the city build?",
        options: ["An indoor swimming pool", "An outdoor skating and sports park"],
    },
    SurveyTemplate {
        title: "Workplace Benefits",
        description: "A company is surveying employees about a new benefit.",
        question: "Which benefit would you prefer?",
        options: [
            "Two extra vacation days per year",
            "A monthly public transit pass",
        ],
    },
    SurveyTemplate {
        title: "Downtown Transportation",
        description: "The city council is deciding how to reduce downtown traffic.",
        question: "Which plan should the city choose?",
        options: [
            "Expand the bus and light rail network",
            "Build more protected bike lanes",
        ],
    },
];

const CRITERION_SCHEMA: &str = r#"{
    "score": 8,
    "feedback": "...",
    "strengths": ["..."],
    "areas_for_improvement": ["..."],
    "examples": ["Quote from the text"]
  }"#;

pub fn task1_prompt(context: &str, scenario: &str, purpose: &str) -> String {
    format!(
        r#"You are an expert CELPIP test creator.

Create a CELPIP Writing Task 1 (Writing an Email).

Situation category: {context}
Situation: {scenario}
Purpose of the email: {purpose}

The scenario must name a realistic Canadian recipient, explain the background in 3-4 sentences,
and list exactly 3 key points the test taker must address. The email should be {WORD_COUNT_MIN}-{WORD_COUNT_MAX} words.

Use this JSON structure:
{{
  "task_id": "writing_task1_<unique>",
  "scenario": {{
    "scenario_id": "scenario_1",
    "title": "...",
    "context": "...",
    "recipient": "...",
    "purpose": "{purpose}",
    "key_points": ["...", "...", "..."],
    "tone": "formal",
    "relationship": "..."
  }},
  "time_limit_minutes": 27,
  "word_count_min": {WORD_COUNT_MIN},
  "word_count_max": {WORD_COUNT_MAX},
  "task_type": "email"
}}

{JSON_ONLY}"#
    )
}

pub fn task2_prompt(survey: &SurveyTemplate) -> String {
    let [option_a, option_b] = survey.options;
    format!(
        r#"You are an expert CELPIP test creator.

Create a CELPIP Writing Task 2 (Responding to Survey Questions) based on this survey:

Title: {title}
Description: {description}
Question: {question}
Option A: {option_a}
Option B: {option_b}

Expand the description into 2-3 sentences of Canadian context and add 3 considerations
the test taker may weigh when choosing.

Use this JSON structure:
{{
  "task_id": "writing_task2_<unique>",
  "survey": {{
    "survey_id": "survey_1",
    "title": "{title}",
    "description": "...",
    "question": "{question}",
    "options": ["{option_a}", "{option_b}"],
    "additional_considerations": ["...", "...", "..."]
  }},
  "time_limit_minutes": 26,
  "word_count_min": {WORD_COUNT_MIN},
  "word_count_max": {WORD_COUNT_MAX},
  "task_type": "survey_response"
}}

{JSON_ONLY}"#,
        title = survey.title,
        description = survey.description,
        question = survey.question,
    )
}

const RUBRIC: &str = "Score every dimension on the CELPIP 1-12 scale \
(1-2 inadequate, 3-4 developing, 5-6 adequate, 7-8 good, 9-10 very good, 11-12 excellent):
1. content_coherence: key points covered, focus, logical development
2. vocabulary: range, precision, idiomatic and appropriate word choice
3. readability: grammar, mechanics, sentence variety, clarity
4. task_fulfillment: format, tone, completeness, register
The overall score reflects the average but weighs critical weaknesses.";

fn review_schema(extra: &str) -> String {
    format!(
        r#"{{
  "overall_score": 8,
  "content_coherence": {CRITERION_SCHEMA},
  "vocabulary": {CRITERION_SCHEMA},
  "readability": {CRITERION_SCHEMA},
  "task_fulfillment": {CRITERION_SCHEMA},
  "overall_feedback": "...",
  "improvement_strategies": ["...", "...", "..."],
  "word_count": 0,
  "is_word_count_appropriate": true,
  "key_achievements": ["..."],
  "priority_improvements": ["..."]{extra}
}}"#
    )
}

pub fn task1_review_prompt(user_text: &str, scenario: &EmailScenario) -> String {
    let schema = review_schema("");
    format!(
        r#"You are an expert CELPIP Writing Task 1 assessor.

{RUBRIC}

Task requirements:
Scenario: {title}
Context: {context}
Recipient: {recipient}
Purpose: {purpose}
Required tone: {tone}
Word count: {WORD_COUNT_MIN}-{WORD_COUNT_MAX} words
Key points to address:
{key_points}

Test taker's email:
```
{user_text}
```

Quote the test taker's text in the examples. Use this JSON structure:
{schema}

{JSON_ONLY}"#,
        title = scenario.title,
        context = scenario.context,
        recipient = scenario.recipient,
        purpose = scenario.purpose,
        tone = scenario.tone,
        key_points = bullet_list(&scenario.key_points),
    )
}

pub fn task2_review_prompt(user_text: &str, survey: &Survey, chosen_option: &str) -> String {
    let schema = review_schema(
        r#",
  "chosen_option": "...",
  "option_support_quality": "How convincingly the chosen option was supported""#,
    );
    format!(
        r#"You are an expert CELPIP Writing Task 2 assessor.

{RUBRIC}
For task_fulfillment also judge whether the response clearly picks one option and supports it.

Survey: {title}
Description: {description}
Question: {question}
Options:
{options}
Option chosen by the test taker: {chosen_option}
Word count: {WORD_COUNT_MIN}-{WORD_COUNT_MAX} words

Test taker's response:
```
{user_text}
```

Use this JSON structure:
{schema}

{JSON_ONLY}"#,
        title = survey.title,
        description = survey.description,
        question = survey.question,
        options = bullet_list(&survey.options),
    )
}
