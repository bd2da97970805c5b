use serde::{Deserialize, Serialize};
use validator::Validate;

const QUALITY_LINE: &str = "Quality: high quality, detailed, clear composition, good lighting.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageStyle {
    #[default]
    Realistic,
    Cartoon,
    Professional,
    Casual,
    Educational,
    Diagram,
}

impl ImageStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Realistic => "realistic",
            Self::Cartoon => "cartoon",
            Self::Professional => "professional",
            Self::Casual => "casual",
            Self::Educational => "educational",
            Self::Diagram => "diagram",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Realistic => "Create a photorealistic image with natural lighting and authentic details",
            Self::Cartoon => "Create a cartoon-style illustration with vibrant colors and clear lines",
            Self::Professional => {
                "Create a professional, clean image suitable for business or educational contexts"
            }
            Self::Casual => "Create a casual, relaxed scene with natural, everyday atmosphere",
            Self::Educational => {
                "Create an educational illustration that clearly shows details for learning purposes"
            }
            Self::Diagram => "Create a clear, diagram-style illustration with clean lines and labels if appropriate",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSize {
    #[serde(rename = "256x256")]
    Small,
    #[default]
    #[serde(rename = "512x512")]
    Medium,
    #[serde(rename = "1024x1024")]
    Large,
    #[serde(rename = "1024x512")]
    Wide,
    #[serde(rename = "512x1024")]
    Tall,
}

impl ImageSize {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "256x256",
            Self::Medium => "512x512",
            Self::Large => "1024x1024",
            Self::Wide => "1024x512",
            Self::Tall => "512x1024",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ImageGenerationRequest {
    #[validate(length(min = 1))]
    pub prompt: String,
    #[serde(default)]
    pub style: ImageStyle,
    #[serde(default)]
    pub size: ImageSize,
    #[serde(default = "default_quality")]
    pub quality: String,
    pub context: Option<String>,
    pub negative_prompt: Option<String>,
    /// e.g. `speaking`, which asks for a scene rich enough to describe aloud.
    pub task_type: Option<String>,
}

impl ImageGenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            style: ImageStyle::default(),
            size: ImageSize::default(),
            quality: default_quality(),
            context: None,
            negative_prompt: None,
            task_type: None,
        }
    }

    /// Full prompt sent to an image backend.
    pub fn render_prompt(&self) -> String {
        let mut parts = vec![
            "Generate a high-quality image based on the following description:".to_string(),
            self.prompt.clone(),
            format!("Style: {}", self.style.description()),
        ];
        if let Some(context) = &self.context {
            parts.push(format!("Additional context: {context}"));
        }
        parts.push(QUALITY_LINE.to_string());
        if let Some(negative) = &self.negative_prompt {
            parts.push(format!("Avoid: {negative}"));
        }
        if self.task_type.as_deref() == Some("speaking") {
            parts.push(
                "Make the scene detailed enough to provide rich content for verbal description. \
                 Include clear, identifiable objects, people, and activities. \
                 Use compositions that encourage detailed spatial description."
                    .to_string(),
            );
        }
        parts.join(" ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageGenerationResponse {
    pub success: bool,
    pub image_url: Option<String>,
    /// Base64 encoded image bytes.
    pub image_data: Option<String>,
    pub error_message: Option<String>,
    pub generation_time_seconds: Option<f64>,
    pub prompt_used: Option<String>,
    pub style_applied: Option<String>,
    pub size_generated: Option<String>,
}

fn default_quality() -> String {
    "standard".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speaking_prompt_includes_style_negative_and_scene_hints() {
        let mut request = ImageGenerationRequest::new("A busy farmers market");
        request.style = ImageStyle::Cartoon;
        request.negative_prompt = Some("text, watermarks".to_string());
        request.task_type = Some("speaking".to_string());

        let prompt = request.render_prompt();
        assert!(prompt.contains("A busy farmers market"));
        assert!(prompt.contains("cartoon-style"));
        assert!(prompt.contains("Avoid: text, watermarks"));
        assert!(prompt.contains("high quality, detailed, clear composition, good lighting"));
        assert!(prompt.contains("spatial description"));
    }

    #[test]
    fn size_uses_pixel_dimensions_on_the_wire() {
        let size: ImageSize = serde_json::from_str("\"1024x512\"").unwrap();
        assert_eq!(size, ImageSize::Wide);
        assert_eq!(serde_json::to_string(&ImageSize::default()).unwrap(), "\"512x512\"");
    }
}
