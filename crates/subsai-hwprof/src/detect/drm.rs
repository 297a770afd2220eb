use std::fs;
use std::path::Path;

pub const VENDOR_INTEL: &str = "0x8086";

/// Best-effort Intel GPU detection from a sysfs DRM tree.
///
/// Looks at `<root>/card*/device/vendor`. Unreadable entries are skipped and a
/// missing root means "no Intel GPU"; this never fails.
pub fn detect_intel_gpu_in(root: &Path) -> bool {
    let entries = match fs::read_dir(root) {
        Ok(e) => e,
        Err(e) => {
            log::debug!("[drm] {} not readable: {e}", root.display());
            return false;
        }
    };

    for entry in entries.flatten() {
        let name = entry.file_name();
        if !name.to_string_lossy().starts_with("card") {
            continue;
        }
        let vendor_file = entry.path().join("device").join("vendor");
        match fs::read_to_string(&vendor_file) {
            Ok(raw) if is_intel_vendor(&raw) => {
                log::debug!("[drm] intel gpu at {}", vendor_file.display());
                return true;
            }
            Ok(_) => {}
            Err(e) => {
                log::debug!("[drm] skip {}: {e}", vendor_file.display());
            }
        }
    }

    false
}

fn is_intel_vendor(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case(VENDOR_INTEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vendor_match_ignores_case_and_whitespace() {
        assert!(is_intel_vendor("0x8086\n"));
        assert!(is_intel_vendor("  0X8086 "));
        assert!(!is_intel_vendor("0x10de\n"));
        assert!(!is_intel_vendor("0x1002"));
        assert!(!is_intel_vendor(""));
    }

    #[test]
    fn missing_root_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!detect_intel_gpu_in(&dir.path().join("does-not-exist")));
    }
}
