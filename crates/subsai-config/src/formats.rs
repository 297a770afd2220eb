/// Subtitle file extensions the toolkit reads and writes, in pysubs2 order.
pub const SUBTITLE_EXTENSIONS: &[&str] = &[".srt", ".ass", ".ssa", ".sub", ".json", ".txt", ".vtt"];

/// dl-translate models; the first one is the default.
pub fn available_translation_models() -> Vec<&'static str> {
    vec![
        "facebook/m2m100_418M",
        "facebook/m2m100_1.2B",
        "facebook/mbart-large-50-many-to-many-mmt",
        "facebook/nllb-200-distilled-600M",
    ]
}

pub fn available_subs_formats(include_extensions: bool) -> Vec<String> {
    SUBTITLE_EXTENSIONS
        .iter()
        .map(|ext| {
            if include_extensions {
                ext.to_string()
            } else {
                ext.trim_start_matches('.').to_string()
            }
        })
        .collect()
}
