use super::JSON_ONLY;
use crate::models::speaking::SpeakingTaskType;

pub const TASK1_ADVICE_SCENARIOS: &[&str] = &[
    "A friend wants to start a new hobby but can't decide between painting and photography",
    "A colleague is considering changing careers but is worried about job security",
    "A family member wants to adopt a pet but lives in a small apartment",
    "A friend is thinking about moving to a new city but doesn't know anyone there",
    "A coworker is considering taking a part-time job while studying",
    "A friend wants to save money for a big purchase but struggles with budgeting",
    "A neighbor wants to learn a new language but doesn't know the best approach",
];

pub const PERSON_DESCRIPTIONS: &[&str] = &[
    "A close friend who values your opinion",
    "A work colleague who respects your experience",
    "A family member who often asks for your advice",
    "A neighbor who has become a good friend",
    "A friend from your hobby group",
];

pub const ADVICE_CONTEXTS: &[&str] = &[
    "personal development",
    "career advancement",
    "financial planning",
    "health and wellness",
    "education and learning",
    "work-life balance",
];

pub const TASK2_EXPERIENCE_TOPICS: &[&str] = &[
    "a time when you had to suddenly change a plan",
    "a time when you lost something important",
    "a holiday that is most special to you",
    "a difficult decision you had to make",
    "an experience that changed your perspective",
    "a time when you overcame a fear",
];

pub const EXPERIENCE_TYPES: &[&str] = &[
    "Education and learning",
    "Family and relationships",
    "Cultural experience",
    "Community involvement",
    "Health and wellness",
];

pub const TASK3_SCENE_TYPES: &[&str] = &[
    "Indoor workplace",
    "Educational setting",
    "Transportation hub",
    "Community event",
    "Natural environment",
    "Restaurant or cafe",
];

pub const TASK3_SCENE_SETTINGS: &[&str] = &[
    "Busy office during working hours",
    "University campus during class time",
    "Airport terminal or train station",
    "Community festival or fair",
    "Forest hiking trail",
    "Coffee shop during peak hours",
];

pub const TASK4_PREDICTION_SCENARIOS: &[&str] = &[
    "Elementary school classroom during math lesson",
    "Downtown street market during lunch hour",
    "Restaurant kitchen during dinner rush",
    "Beach volleyball court during tournament",
    "Wedding reception during cake cutting",
    "Pet store during adoption event",
];

pub const TASK4_PREDICTION_ELEMENTS: &[&str] = &[
    "people's actions and movements",
    "environmental changes",
    "completed tasks or projects",
    "emotional reactions",
    "cause and effect relationships",
];

pub const TASK5_COMPARISON_SCENARIOS: &[&str] = &[
    "Choosing between two houses to buy",
    "Deciding between two vacation destinations",
    "Selecting between two smartphones",
    "Choosing between two apartments to rent",
    "Selecting between two childcare centers",
    "Choosing between two office spaces",
];

pub const TASK5_DECISION_MAKERS: &[&str] = &[
    "family member",
    "friend",
    "business partner",
    "sibling",
    "boss or supervisor",
    "travel companion",
];

pub const TASK5_CATEGORIES: &[&str] = &[
    "Automotive",
    "Education",
    "Health & Fitness",
    "Home & Garden",
    "Services",
    "Shopping",
];

pub const TASK6_DIFFICULT_SITUATIONS: &[&str] = &[
    "Your friend borrowed your car and got into an accident, now insurance won't cover the damage",
    "Your neighbor's dog keeps barking at night but they're elderly and the dog is their only companion",
    "Your colleague takes credit for your work but confronting them might hurt team dynamics",
    "Your sibling wants to borrow money but hasn't paid back previous loans",
    "Your study partner for an important exam isn't pulling their weight",
];

pub const TASK6_RELATIONSHIP_CONTEXTS: &[&str] = &[
    "close family members",
    "work colleagues",
    "roommates or housemates",
    "classmates or study partners",
    "childhood friends",
];

pub const TASK7_OPINION_TOPICS: &[&str] = &[
    "All employees should be required to work from home at least two days per week",
    "People should be required to retire at age 65",
    "All plastic bags should be banned from stores",
    "Traditional books are better than e-books",
    "Homework should be banned for elementary school students",
    "Social media has more negative effects than positive effects on society",
];

pub const TASK7_CONTEXT_TYPES: &[&str] = &[
    "workplace policy discussion",
    "environmental policy debate",
    "transportation policy discussion",
    "community policy debate",
    "lifestyle policy discussion",
];

pub const TASK8_UNUSUAL_SITUATIONS: &[&str] = &[
    "A person wearing winter coat and scarf on a hot beach day",
    "A businessman in a suit riding a children's tricycle to work",
    "Someone using an umbrella indoors on a clear day",
    "A person painting a wall with a toothbrush instead of a brush",
    "Someone watering plants with a coffee cup instead of a watering can",
];

pub const TASK8_UNUSUAL_CONTEXTS: &[&str] = &[
    "Urban street scene during daytime",
    "Public park or recreation area",
    "Residential neighborhood",
    "Sports facility or gymnasium",
    "Community center or public building",
];

/// Shared frame for every generation prompt: task header, brief, scenario
/// schema and the instruction block with the task's timing.
fn task_prompt(kind: SpeakingTaskType, name: &str, brief: &str, scenario_schema: &str) -> String {
    let timing = kind.timing();
    let selection = timing
        .selection_seconds
        .map(|s| format!("\n    \"selection_time_seconds\": {s},"))
        .unwrap_or_default();
    format!(
        r#"You are an expert CELPIP test creator.

Create a CELPIP Speaking Task {number} ({name}).

{brief}

Use this JSON structure:
{{
  "task_id": "speaking_task{number}_<unique>",
  "scenario": {scenario_schema},
  "instructions": {{{selection}
    "preparation_time_seconds": {prep},
    "speaking_time_seconds": {speak},
    "task_description": "What the test taker must do, addressed to them",
    "evaluation_criteria": ["Content/Coherence", "Vocabulary", "Listenability", "Task Fulfillment"],
    "tips": ["...", "..."]
  }},
  "difficulty_level": "intermediate",
  "estimated_duration_minutes": {minutes}
}}

{JSON_ONLY}"#,
        number = kind.number(),
        prep = timing.preparation_seconds,
        speak = timing.speaking_seconds,
        minutes = kind.estimated_minutes(),
    )
}

pub fn task1_prompt(situation: &str, person_description: &str, advice_context: &str) -> String {
    let brief = format!(
        "The test taker gives advice to someone.\n\
         Situation: {situation}\n\
         The person asking: {person_description}\n\
         Advice area: {advice_context}\n\
         Make the situation specific enough that two or three concrete suggestions are possible."
    );
    task_prompt(
        SpeakingTaskType::GivingAdvice,
        "Giving Advice",
        &brief,
        &format!(
            r#"{{
    "scenario_id": "scenario_1",
    "title": "...",
    "situation": "...",
    "context": "...",
    "person_description": "{person_description}",
    "advice_topic": "{advice_context}"
  }}"#
        ),
    )
}

pub fn task2_prompt(topic: &str, experience_type: &str) -> String {
    let brief = format!(
        "The test taker talks about a personal experience.\n\
         Topic: talk about {topic}\n\
         Experience area: {experience_type}\n\
         Provide four guiding questions (what, when, where, how it felt or what was learned)."
    );
    task_prompt(
        SpeakingTaskType::TalkingAboutPersonalExperience,
        "Talking about a Personal Experience",
        &brief,
        &format!(
            r#"{{
    "scenario_id": "scenario_1",
    "title": "...",
    "topic": "{topic}",
    "context": "...",
    "experience_type": "{experience_type}",
    "guiding_questions": ["...", "...", "...", "..."]
  }}"#
        ),
    )
}

pub fn task3_prompt(scene_type: &str, scene_setting: &str) -> String {
    let brief = format!(
        "The test taker describes a picture of a scene.\n\
         Scene type: {scene_type}\n\
         Setting: {scene_setting}\n\
         The image_description is used to draw the picture, so it must list people, objects, \
         actions and where they are (foreground, background, left, right)."
    );
    task_prompt(
        SpeakingTaskType::DescribingScene,
        "Describing a Scene",
        &brief,
        r#"{
    "scenario_id": "scenario_1",
    "title": "...",
    "scene_description": "...",
    "context": "...",
    "scene_type": "...",
    "key_elements": ["...", "...", "...", "..."],
    "spatial_layout": "...",
    "image_description": "..."
  }"#,
    )
}

pub fn task4_prompt(scenario: &str, prediction_element: &str) -> String {
    let brief = format!(
        "The test taker looks at the same kind of scene as Task 3 and predicts what will happen next.\n\
         Scene: {scenario}\n\
         Prediction focus: {prediction_element}\n\
         Include visible clues in the scene that support at least three plausible outcomes."
    );
    task_prompt(
        SpeakingTaskType::MakingPredictions,
        "Making Predictions",
        &brief,
        r#"{
    "scenario_id": "scenario_1",
    "title": "...",
    "scene_description": "...",
    "context": "...",
    "scene_type": "...",
    "current_situation": "...",
    "key_characters": ["...", "..."],
    "prediction_elements": ["...", "..."],
    "possible_outcomes": ["...", "...", "..."],
    "image_description": "..."
  }"#,
    )
}

pub fn task5_prompt(comparison: &str, decision_maker: &str, category: &str) -> String {
    let brief = format!(
        "The test taker compares two options, picks one, and persuades a {decision_maker} \
         who prefers a third option.\n\
         Decision: {comparison}\n\
         Category: {category}\n\
         Give both options concrete specifications, a price and balanced pros and cons. \
         Each option needs an image_description for its picture."
    );
    let option = |id: &str| {
        format!(
            r#"{{
      "option_id": "{id}",
      "title": "...",
      "description": "...",
      "specifications": ["...", "..."],
      "price": "...",
      "pros": ["...", "..."],
      "cons": ["...", "..."],
      "image_description": "..."
    }}"#
        )
    };
    task_prompt(
        SpeakingTaskType::ComparingAndPersuading,
        "Comparing and Persuading",
        &brief,
        &format!(
            r#"{{
    "scenario_id": "scenario_1",
    "title": "...",
    "context": "...",
    "decision_maker": "{decision_maker}",
    "category": "{category}",
    "option_a": {option_a},
    "option_b": {option_b},
    "persuasion_context": "Why the decision maker leans the other way"
  }}"#,
            option_a = option("option_a"),
            option_b = option("option_b"),
        ),
    )
}

pub fn task6_prompt(situation: &str, relationship_context: &str) -> String {
    let brief = format!(
        "The test taker faces a difficult situation and chooses one of two people to talk to.\n\
         Situation: {situation}\n\
         Relationship: {relationship_context}\n\
         Offer exactly two communication options, each addressing a different person."
    );
    task_prompt(
        SpeakingTaskType::DealingWithDifficultSituation,
        "Dealing with a Difficult Situation",
        &brief,
        r#"{
    "scenario_id": "scenario_1",
    "title": "...",
    "situation_description": "...",
    "context": "...",
    "involved_parties": ["...", "..."],
    "dilemma_explanation": "...",
    "communication_options": ["Talk to ... and ...", "Talk to ... and ..."],
    "relationship_context": "..."
  }"#,
    )
}

pub fn task7_prompt(topic: &str, context_type: &str) -> String {
    let brief = format!(
        "The test taker states and defends an opinion.\n\
         Statement: {topic}\n\
         Context: {context_type}\n\
         Give two positions (agree, disagree) and supporting points for both sides."
    );
    task_prompt(
        SpeakingTaskType::ExpressingOpinions,
        "Expressing Opinions",
        &brief,
        &format!(
            r#"{{
    "scenario_id": "scenario_1",
    "title": "...",
    "topic_statement": "{topic}",
    "context": "...",
    "position_options": ["Agree", "Disagree"],
    "supporting_points": ["...", "...", "..."],
    "considerations": ["...", "..."]
  }}"#
        ),
    )
}

pub fn task8_prompt(situation: &str, context: &str) -> String {
    let brief = format!(
        "The test taker describes an unusual picture to someone on the phone.\n\
         Unusual situation: {situation}\n\
         Setting: {context}\n\
         The image_description is used to draw the picture; make the unusual details obvious."
    );
    task_prompt(
        SpeakingTaskType::DescribingUnusualSituation,
        "Describing an Unusual Situation",
        &brief,
        r#"{
    "scenario_id": "scenario_1",
    "title": "...",
    "situation_description": "...",
    "context": "...",
    "unusual_elements": ["...", "...", "..."],
    "possible_explanations": ["...", "..."],
    "descriptive_focus": "...",
    "image_description": "..."
  }"#,
    )
}

/// What the content and task fulfillment criteria weigh for each task.
fn evaluation_focus(kind: SpeakingTaskType) -> (&'static str, &'static str) {
    match kind {
        SpeakingTaskType::GivingAdvice => (
            "relevance and depth of the advice, concrete suggestions with reasons",
            "addresses the person's request directly and covers the full situation",
        ),
        SpeakingTaskType::TalkingAboutPersonalExperience => (
            "clear narrative with when, where, what happened and why it mattered",
            "answers the guiding questions with personal detail",
        ),
        SpeakingTaskType::DescribingScene => (
            "accurate description of people, objects and actions in the picture",
            "uses spatial language and covers the most important parts of the scene",
        ),
        SpeakingTaskType::MakingPredictions => (
            "plausible predictions grounded in visible clues",
            "uses future forms and explains why each outcome is likely",
        ),
        SpeakingTaskType::ComparingAndPersuading => (
            "logical comparison of both options and persuasive reasons",
            "makes a clear choice and persuades the specific decision maker",
        ),
        SpeakingTaskType::DealingWithDifficultSituation => (
            "tactful explanation of the problem and a workable solution",
            "speaks directly to the chosen person in an appropriate register",
        ),
        SpeakingTaskType::ExpressingOpinions => (
            "clear position supported by reasons and examples",
            "stays on one side and addresses counterarguments",
        ),
        SpeakingTaskType::DescribingUnusualSituation => (
            "precise description of what makes the picture unusual",
            "the listener could picture the scene without seeing it",
        ),
    }
}

pub fn evaluation_prompt(
    kind: SpeakingTaskType,
    transcript: &str,
    scenario: &str,
    instructions: &str,
    timing: &str,
    selected_option: Option<&str>,
) -> String {
    let (content_focus, fulfillment_focus) = evaluation_focus(kind);
    let selected = selected_option
        .map(|option| format!("\nSELECTED OPTION: {option}\n"))
        .unwrap_or_default();
    let extra_fields = if kind == SpeakingTaskType::ComparingAndPersuading {
        r#"
  "selected_option_analysis": "How suitable the chosen option was",
  "persuasion_effectiveness": "How persuasive the response was","#
    } else {
        ""
    };
    format!(
        r#"Evaluate this CELPIP {label} response according to official CELPIP criteria.

TASK SCENARIO:
{scenario}

TASK INSTRUCTIONS:
{instructions}
{selected}
TIMING INFORMATION:
{timing}

TRANSCRIPT:
{transcript}

Score each criterion on the 1-12 scale:
1. CONTENT/COHERENCE: {content_focus}
2. VOCABULARY: range, precision and natural expressions
3. LISTENABILITY: grammar, sentence variety, fluency and pacing
4. TASK FULFILLMENT: {fulfillment_focus}; use of the available time

Use this JSON structure:
{{
  "scores": {{
    "content_score": 0.0,
    "vocabulary_score": 0.0,
    "language_use_score": 0.0,
    "task_fulfillment_score": 0.0,
    "overall_score": 0.0
  }},
  "feedback": {{
    "strengths": ["...", "...", "..."],
    "improvements": ["...", "...", "..."],
    "specific_suggestions": ["...", "...", "..."],
    "pronunciation_notes": "...",
    "fluency_notes": "..."
  }},{extra_fields}
  "confidence_level": 0.85
}}

Be fair and constructive and quote the transcript when pointing out strengths or problems.

{JSON_ONLY}"#,
        label = kind.label(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_prompt_carries_task_timing() {
        let prompt = task5_prompt("Choosing between two houses", "sibling", "Home & Garden");
        assert!(prompt.contains("Speaking Task 5"));
        assert!(prompt.contains("\"selection_time_seconds\": 60"));
        assert!(prompt.contains("\"option_id\": \"option_b\""));

        let prompt = task1_prompt("A friend moves", "A close friend", "career advancement");
        assert!(prompt.contains("\"speaking_time_seconds\": 90"));
        assert!(!prompt.contains("selection_time_seconds"));
    }

    #[test]
    fn evaluation_prompt_adds_persuasion_fields_only_for_task5() {
        let task5 = evaluation_prompt(
            SpeakingTaskType::ComparingAndPersuading,
            "I would pick the house",
            "scenario",
            "instructions",
            "Speaking Time Used: 55 seconds",
            Some("option_a"),
        );
        assert!(task5.contains("SELECTED OPTION: option_a"));
        assert!(task5.contains("persuasion_effectiveness"));

        let task3 = evaluation_prompt(
            SpeakingTaskType::DescribingScene,
            "There is a man",
            "scenario",
            "instructions",
            "",
            None,
        );
        assert!(task3.contains("Speaking Task 3"));
        assert!(!task3.contains("persuasion_effectiveness"));
        assert!(!task3.contains("SELECTED OPTION"));
    }

    #[test]
    fn every_table_has_entries() {
        for table in [
            TASK1_ADVICE_SCENARIOS,
            TASK2_EXPERIENCE_TOPICS,
            TASK3_SCENE_TYPES,
            TASK4_PREDICTION_SCENARIOS,
            TASK5_COMPARISON_SCENARIOS,
            TASK6_DIFFICULT_SITUATIONS,
            TASK7_OPINION_TOPICS,
            TASK8_UNUSUAL_SITUATIONS,
        ] {
            assert!(!table.is_empty());
        }
    }
}
