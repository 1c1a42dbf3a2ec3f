//! Submission payloads for the two wizard workflows.
//!
//! Payloads are validated by the wizard step that assembles them (script
//! syntax, required scene fields); the submitter sends them as-is.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::job::JobKind;

/// Generation settings forwarded to the pipeline.
///
/// Known knobs are typed; everything else rides along in `extra` so new
/// backend options don't require a client release.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GenerationConfig {
    /// Target aspect ratio, e.g. "16:9" or "9:16"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,

    /// Output resolution, e.g. "1080p"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,

    /// Visual style preset name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    /// Additional backend options, passed through unmodified
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Payload for a script-driven (full workflow) job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FullWorkflowPayload {
    /// Authored script text, already validated by the script step
    pub script: String,

    /// Curated character reference images, keyed by character name
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub character_images: HashMap<String, String>,

    /// Curated scene images, keyed by scene ID
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub scene_images: HashMap<String, String>,

    /// Generation settings
    #[serde(default)]
    pub config: GenerationConfig,
}

impl FullWorkflowPayload {
    /// Create a payload from validated script text.
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            character_images: HashMap::new(),
            scene_images: HashMap::new(),
            config: GenerationConfig::default(),
        }
    }

    /// Attach a curated character reference image.
    pub fn with_character_image(
        mut self,
        name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        self.character_images.insert(name.into(), url.into());
        self
    }

    /// Attach a curated scene image.
    pub fn with_scene_image(mut self, scene_id: impl Into<String>, url: impl Into<String>) -> Self {
        self.scene_images.insert(scene_id.into(), url.into());
        self
    }

    /// Set generation settings.
    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }
}

/// Camera motion applied to a quick-workflow scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CameraMotion {
    Static,
    PanLeft,
    PanRight,
    ZoomIn,
    ZoomOut,
}

impl CameraMotion {
    pub fn as_str(&self) -> &'static str {
        match self {
            CameraMotion::Static => "static",
            CameraMotion::PanLeft => "pan_left",
            CameraMotion::PanRight => "pan_right",
            CameraMotion::ZoomIn => "zoom_in",
            CameraMotion::ZoomOut => "zoom_out",
        }
    }
}

impl fmt::Display for CameraMotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One scene in a quick-workflow job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QuickScene {
    /// Source image for the scene
    pub image_url: String,

    /// Scene duration in seconds
    pub duration_secs: f64,

    /// Optional animation prompt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    /// Optional camera motion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_motion: Option<CameraMotion>,
}

impl QuickScene {
    /// Create a scene from an image and duration.
    pub fn new(image_url: impl Into<String>, duration_secs: f64) -> Self {
        Self {
            image_url: image_url.into(),
            duration_secs,
            prompt: None,
            camera_motion: None,
        }
    }

    /// Set the animation prompt.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Set the camera motion.
    pub fn with_camera_motion(mut self, motion: CameraMotion) -> Self {
        self.camera_motion = Some(motion);
        self
    }
}

/// Payload for an image-driven (quick workflow) job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QuickWorkflowPayload {
    /// Ordered scene list
    pub scenes: Vec<QuickScene>,

    /// Generation settings
    #[serde(default)]
    pub config: GenerationConfig,
}

impl QuickWorkflowPayload {
    /// Create a payload from an ordered scene list.
    pub fn new(scenes: Vec<QuickScene>) -> Self {
        Self {
            scenes,
            config: GenerationConfig::default(),
        }
    }

    /// Set generation settings.
    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }
}

/// Submission payload wrapper, tagged by workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JobPayload {
    /// Script-driven generation
    FullWorkflow(FullWorkflowPayload),
    /// Image-driven generation
    QuickWorkflow(QuickWorkflowPayload),
}

impl JobPayload {
    /// Which workflow this payload submits.
    pub fn kind(&self) -> JobKind {
        match self {
            JobPayload::FullWorkflow(_) => JobKind::FullWorkflow,
            JobPayload::QuickWorkflow(_) => JobKind::QuickWorkflow,
        }
    }

    /// Generation settings for either workflow.
    pub fn config(&self) -> &GenerationConfig {
        match self {
            JobPayload::FullWorkflow(p) => &p.config,
            JobPayload::QuickWorkflow(p) => &p.config,
        }
    }
}
