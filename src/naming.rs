//! Naming conventions shared by the pipeline stages.
//!
//! ## Album ids
//!
//! An album's id is used in file names (`data/<id>.json`, `<id>.html`) and
//! URLs, so directory names written in Chinese are romanized:
//!
//! - `"Shantou"` → `"Shantou"` (no Han characters: used as-is)
//! - `"汕头"` → `"shan-tou"`
//! - `"2024 北京"` → `"2024-bei-jing"`
//!
//! Each Han character becomes its toneless pinyin syllable, each run of other
//! letters or digits becomes one segment, and everything else separates
//! segments. Segments are lower-cased and joined with dashes.
//!
//! ## Output files
//!
//! Each source image `<name>.<ext>` produces `thumb_<name>.jpg` and
//! `large_<name>.jpg`, where `<name>` is the file name without its final
//! extension.

use pinyin::ToPinyin;
use std::path::Path;

fn is_han(c: char) -> bool {
    c.to_pinyin().is_some()
}

/// Derive a URL-safe album id from its directory name.
pub fn album_id(dir_name: &str) -> String {
    if !dir_name.chars().any(is_han) {
        return dir_name.to_string();
    }

    let mut segments: Vec<String> = Vec::new();
    let mut run = String::new();
    for c in dir_name.chars() {
        if let Some(syllable) = c.to_pinyin() {
            if !run.is_empty() {
                segments.push(std::mem::take(&mut run));
            }
            segments.push(syllable.plain().to_string());
        } else if c.is_alphanumeric() {
            run.extend(c.to_lowercase());
        } else if !run.is_empty() {
            segments.push(std::mem::take(&mut run));
        }
    }
    if !run.is_empty() {
        segments.push(run);
    }

    segments.join("-").to_lowercase()
}

/// File name without its final extension (`"a.b.jpg"` → `"a.b"`).
pub fn image_stem(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|s| s.to_str())
}

pub fn thumbnail_file_name(stem: &str) -> String {
    format!("thumb_{stem}.jpg")
}

pub fn large_file_name(stem: &str) -> String {
    format!("large_{stem}.jpg")
}

/// Web-root-relative path of a generated image: `images/<id>/<file>`.
pub fn web_image_path(album_id: &str, file_name: &str) -> String {
    format!("images/{album_id}/{file_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin_name_used_as_is() {
        assert_eq!(album_id("Shantou"), "Shantou");
        assert_eq!(album_id("summer-2024"), "summer-2024");
    }

    #[test]
    fn latin_name_with_spaces_untouched() {
        assert_eq!(album_id("Old Town"), "Old Town");
    }

    #[test]
    fn cjk_name_romanized_and_hyphenated() {
        assert_eq!(album_id("汕头"), "shan-tou");
        assert_eq!(album_id("北京"), "bei-jing");
    }

    #[test]
    fn mixed_name_keeps_latin_runs_lowercased() {
        assert_eq!(album_id("2024 北京"), "2024-bei-jing");
        assert_eq!(album_id("Trip汕头"), "trip-shan-tou");
    }

    #[test]
    fn punctuation_separates_segments() {
        assert_eq!(album_id("汕头·老城"), "shan-tou-lao-cheng");
        assert_eq!(album_id("  北京  "), "bei-jing");
    }

    #[test]
    fn output_file_names() {
        assert_eq!(thumbnail_file_name("IMG_0001"), "thumb_IMG_0001.jpg");
        assert_eq!(large_file_name("IMG_0001"), "large_IMG_0001.jpg");
    }

    #[test]
    fn image_stem_strips_only_last_extension() {
        assert_eq!(image_stem(Path::new("album/a.b.png")), Some("a.b"));
        assert_eq!(image_stem(Path::new("album/dawn.JPG")), Some("dawn"));
    }

    #[test]
    fn web_image_path_uses_forward_slashes() {
        assert_eq!(
            web_image_path("shan-tou", "large_x.jpg"),
            "images/shan-tou/large_x.jpg"
        );
    }
}
