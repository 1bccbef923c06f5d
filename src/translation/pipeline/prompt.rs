//! 提示词构建

use crate::translation::error::TranslationResult;

use super::segmenter::Segment;

/// 整段翻译提示词
pub fn text_prompt(language_name: &str, text: &str) -> String {
    format!(
        "Translate the following text to {}. Only provide the translation without any additional explanation or commentary.\n\n{}",
        language_name, text
    )
}

/// 段落翻译提示词，后接序列化后的段落数组
pub fn paragraph_prompt(language_name: &str, segments: &[Segment]) -> TranslationResult<String> {
    let instructions = format!(
        "Translate each HTML snippet into {}. \
         Keep all HTML tags and attributes unchanged. \
         Only translate human-readable text nodes. \
         Return only JSON (no markdown) as an array of objects: \
         [{{\"id\":\"seg_1\",\"html\":\"...\"}}].",
        language_name
    );
    let payload = serde_json::to_string(segments)?;

    Ok(format!("{}\n\n{}", instructions, payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_prompt() {
        assert_eq!(
            text_prompt("Japanese", "Hello"),
            "Translate the following text to Japanese. Only provide the translation \
             without any additional explanation or commentary.\n\nHello"
        );
    }

    #[test]
    fn test_paragraph_prompt_carries_payload() {
        let segments = vec![Segment {
            id: "seg_1".to_string(),
            html: "Hi <b>there</b>".to_string(),
        }];
        let prompt = paragraph_prompt("Simplified Chinese", &segments).unwrap();

        assert!(prompt.starts_with(
            "Translate each HTML snippet into Simplified Chinese. Keep all HTML tags and attributes unchanged."
        ));
        assert!(prompt.contains("[{\"id\":\"seg_1\",\"html\":\"...\"}]."));
        assert!(prompt.ends_with("\n\n[{\"id\":\"seg_1\",\"html\":\"Hi <b>there</b>\"}]"));
    }
}
