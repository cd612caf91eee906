//! Prompt assembly: builds the per-platform instruction text for one task
//! and post-processes the raw model response.
//!
//! Pure functions of the task; no conversation state is kept between calls.

use crate::planner::{Platform, Task};

/// Stock negative prompt attached to Kling outputs.
const NEG_KLING: &str = "nsfw, low quality, blurry, distorted, morphing, extra limbs, bad anatomy, text, watermark, static, frozen, slideshow, jpeg artifacts";

/// Stock negative prompt attached to Luma outputs.
const NEG_LUMA: &str = "distortion, warping, morphing, melting, floating objects, unnatural physics, bad simulation, glitch, low resolution";

/// Stock negative prompt attached to Hailuo outputs.
const NEG_HAILUO: &str = "text, watermark, logo, bad composition, blurry, low quality, cartoon, illustration, painting, drawing";

/// Stock negative prompt attached to Veo outputs.
const NEG_VEO: &str = "distorted, blurry, low resolution, visual artifacts, unstable motion, morphing, grainy, oversaturated";

/// The platform's stock negative prompt text.
pub fn stock_negative(platform: Platform) -> &'static str {
    match platform {
        Platform::Kling => NEG_KLING,
        Platform::Luma => NEG_LUMA,
        Platform::Hailuo => NEG_HAILUO,
        Platform::Veo => NEG_VEO,
    }
}

/// Framing directive appended to every instruction, switching on I2V mode.
fn framing_directive(task: &Task) -> &'static str {
    if task.i2v {
        "IMAGE-TO-VIDEO: an externally supplied reference image defines the scene. \
         Describe ONLY the motion and atmosphere applied to that image, never the static scene itself."
    } else {
        "TEXT-TO-VIDEO: describe the full visual scene from scratch."
    }
}

/// Build the instruction text sent to the backend for one task.
///
/// Each platform gets its own role framing and structural rules; the task's
/// subject and variation label are substituted in.
pub fn assemble(task: &Task) -> String {
    let directive = framing_directive(task);

    match task.platform {
        Platform::Kling => format!(
            "Role: Professional AI Video Director for Kling AI.\n\
             Task: Write a structured prompt.\n\
             Subject: {subject}.\n\
             Camera Movement: {label}.\n\
             Atmosphere: Realistic, 8k.\n\
             \n\
             RULES:\n\
             1. Structure: [Subject Description] + [Specific Action] + [Environment] + [Camera Movement].\n\
             2. Make sure the action is LOOPABLE if possible.\n\
             3. NO intro/outro.\n\
             4. Add {ar} at the end.\n\
             {directive}",
            subject = task.subject,
            label = task.label,
            ar = task.aspect_ratio.flag(),
            directive = directive,
        ),
        Platform::Veo => format!(
            "Role: Expert Cinematographer for Google Veo.\n\
             Task: Create a highly detailed cinematic prompt.\n\
             Subject: {subject}.\n\
             Camera Movement: {label}.\n\
             \n\
             RULES:\n\
             1. Use natural, flowing sentences (No formatting like 'Subject: ...').\n\
             2. Include cinematic terminology (e.g., 'shot on 35mm', 'anamorphic lens', 'golden hour').\n\
             3. Explicitly describe the lighting, texture, and the feeling of the scene.\n\
             4. Start with the main action immediately.\n\
             5. Incorporate '{label}' naturally into the sentence description.\n\
             {directive}",
            subject = task.subject,
            label = task.label,
            directive = directive,
        ),
        Platform::Luma => format!(
            "Role: Luma Labs Expert.\n\
             Task: Write a prompt for Luma.\n\
             Subject: {subject}.\n\
             Movement: {label}.\n\
             \n\
             RULES:\n\
             1. Start with the motion.\n\
             2. Describe physics (gravity, wind, collision).\n\
             3. Include '{label}'.\n\
             4. Output: Raw prompt text only.\n\
             {directive}",
            subject = task.subject,
            label = task.label,
            directive = directive,
        ),
        Platform::Hailuo => format!(
            "Role: Cinematographer.\n\
             Task: Detailed video description for Hailuo.\n\
             Subject: {subject}.\n\
             Movement: {label}.\n\
             RULES: Focus on lighting and time flow. Raw text only.\n\
             {directive}",
            subject = task.subject,
            label = task.label,
            directive = directive,
        ),
    }
}

/// Post-process a raw model response into the final prompt text.
///
/// Strips quoting artifacts and the literal `Prompt:` label. For Kling
/// text-to-video outputs missing the camera-control syntax, appends a
/// suffix derived from the task's movement label.
pub fn post_process(raw: &str, task: &Task) -> String {
    let mut clean = raw
        .trim()
        .replace(['"', '`'], "")
        .replace("Prompt:", "")
        .trim()
        .to_string();

    if task.platform == Platform::Kling && !task.i2v && !clean.contains("--camera") {
        clean.push_str(&format!(
            " --camera_control {}",
            task.label.to_lowercase().replace(' ', "_")
        ));
    }

    clean
}
