use super::JSON_ONLY;

pub const PART1_TOPICS: &[&str] = &[
    "Planning a weekend camping trip",
    "Returning a defective product at a store",
    "Arranging a carpool to work",
    "Booking a table for a family dinner",
    "Registering a child for swimming lessons",
    "Discussing a noisy neighbour with a landlord",
];

pub const PART2_TOPICS: &[&str] = &[
    "Asking a pharmacist about a prescription",
    "Reporting a lost wallet at a transit office",
    "Inquiring about a gym membership",
    "Scheduling a car repair",
    "Opening a new bank account",
];

pub const PART3_TOPICS: &[&str] = &[
    "A tour guide introducing a national park",
    "A librarian explaining new library services",
    "A museum docent describing an exhibit",
    "A city staff member presenting a recycling program",
    "A college advisor explaining course registration",
];

pub const PART4_TOPICS: &[&str] = &[
    "A new bike lane network opening downtown",
    "A community garden project receiving funding",
    "A winter storm affecting local transit",
    "A local business winning an innovation award",
    "A school board approving a new nutrition program",
];

pub const PART5_TOPICS: &[&str] = &[
    "Coworkers discussing a change to the office schedule",
    "Neighbours debating a proposed condo development",
    "Students planning a group presentation",
    "Parents discussing screen time rules",
    "Volunteers organizing a charity fundraiser",
];

pub const PART6_TOPICS: &[&str] = &[
    "Should cities ban cars from downtown cores?",
    "Is a four-day work week good for productivity?",
    "Should homework be eliminated in elementary school?",
    "Are self-checkout machines good for shoppers?",
    "Should public museums be free to visit?",
];

const QUESTION_SCHEMA: &str = r#"{
      "question_id": "q1",
      "question_text": "...",
      "question_type": "multiple_choice",
      "options": ["A. ...", "B. ...", "C. ...", "D. ..."],
      "correct_answer": "A",
      "explanation": "..."
    }"#;

fn conversation_schema(id: &str) -> String {
    format!(
        r#"{{
    "conversation_id": "{id}",
    "title": "...",
    "transcript": "Speaker A: ...\nSpeaker B: ...",
    "audio_description": "Description of voices and background sounds",
    "duration_seconds": 60,
    "speakers": ["Speaker A", "Speaker B"],
    "scenario": "..."
  }}"#
    )
}

pub fn part1_prompt(topic: &str) -> String {
    let conversation = conversation_schema("conv_1");
    format!(
        r#"You are an expert CELPIP test creator.

Create a CELPIP Listening Part 1 (Listening to Problem Solving) about "{topic}".

Structure:
- Three short conversation segments between the same two speakers, each 45-90 seconds when spoken.
- Exactly 8 questions across the segments: 3 for the first, 2 for the second, 3 for the third.
  Set conversation_id on every question to the segment it belongs to.

Use this JSON structure:
{{
  "task_id": "listening_part1_<unique>",
  "conversations": [
  {conversation}
  ],
  "questions": [
    {QUESTION_SCHEMA}
  ],
  "time_limit_minutes": 12
}}

{JSON_ONLY}"#
    )
}

pub fn part2_prompt(topic: &str) -> String {
    single_conversation_prompt(
        "Part 2 (Listening to a Daily Life Conversation)",
        topic,
        "A natural everyday conversation of 90-120 seconds between two speakers.",
        5,
        8,
        "listening_part2",
    )
}

pub fn part3_prompt(topic: &str) -> String {
    single_conversation_prompt(
        "Part 3 (Listening for Information)",
        topic,
        "An informational exchange of about 3 minutes where one speaker explains details to another.",
        6,
        10,
        "listening_part3",
    )
}

fn single_conversation_prompt(
    part: &str,
    topic: &str,
    shape: &str,
    question_count: u32,
    minutes: u32,
    id_prefix: &str,
) -> String {
    let conversation = conversation_schema("conv_1");
    format!(
        r#"You are an expert CELPIP test creator.

Create a CELPIP Listening {part} about "{topic}".

Structure:
- {shape}
- Exactly {question_count} multiple-choice questions with four options each.

Use this JSON structure:
{{
  "task_id": "{id_prefix}_<unique>",
  "conversation": {conversation},
  "questions": [
    {QUESTION_SCHEMA}
  ],
  "time_limit_minutes": {minutes}
}}

{JSON_ONLY}"#
    )
}

pub fn part4_prompt(topic: &str) -> String {
    format!(
        r#"You are an expert CELPIP test creator.

Create a CELPIP Listening Part 4 (Listening to a News Item) about "{topic}".

Structure:
- A Canadian local news report of 90-120 seconds with a reporter, a place and a date.
- Exactly 5 multiple-choice questions.

Use this JSON structure:
{{
  "task_id": "listening_part4_<unique>",
  "news_item": {{
    "news_id": "news_1",
    "title": "...",
    "content": "Full report text",
    "audio_description": "...",
    "duration_seconds": 100,
    "topic": "{topic}",
    "location": "City, Province",
    "date": "...",
    "reporter": "..."
  }},
  "questions": [
    {QUESTION_SCHEMA}
  ],
  "time_limit_minutes": 5
}}

{JSON_ONLY}"#
    )
}

pub fn part5_prompt(topic: &str) -> String {
    format!(
        r#"You are an expert CELPIP test creator.

Create a CELPIP Listening Part 5 (Listening to a Discussion) about "{topic}".

Structure:
- A video discussion of about 2.5 minutes between three speakers with different opinions.
- Exactly 8 multiple-choice questions about who said what and why.

Use this JSON structure:
{{
  "task_id": "listening_part5_<unique>",
  "discussion": {{
    "discussion_id": "disc_1",
    "title": "...",
    "transcript": "...",
    "video_description": "Setting and body language of the speakers",
    "duration_seconds": 150,
    "speakers": ["...", "...", "..."],
    "setting": "...",
    "topic": "{topic}",
    "key_points": ["..."]
  }},
  "questions": [
    {QUESTION_SCHEMA}
  ],
  "time_limit_minutes": 4
}}

{JSON_ONLY}"#
    )
}

pub fn part6_prompt(topic: &str) -> String {
    format!(
        r#"You are an expert CELPIP test creator.

Create a CELPIP Listening Part 6 (Listening to Viewpoints) on the question "{topic}".

Structure:
- A single speaker presenting a clear position for about 3 minutes, with arguments and evidence.
- Exactly 6 multiple-choice questions about the speaker's position and reasoning.

Use this JSON structure:
{{
  "task_id": "listening_part6_<unique>",
  "viewpoint": {{
    "viewpoint_id": "view_1",
    "title": "...",
    "content": "Full talk text",
    "audio_description": "...",
    "duration_seconds": 180,
    "speaker": "Name and role",
    "topic": "{topic}",
    "position": "...",
    "key_arguments": ["..."],
    "supporting_evidence": ["..."]
  }},
  "questions": [
    {QUESTION_SCHEMA}
  ],
  "time_limit_minutes": 8
}}

{JSON_ONLY}"#
    )
}
