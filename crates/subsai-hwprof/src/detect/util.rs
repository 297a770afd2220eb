use std::ffi::OsString;
use std::path::PathBuf;

pub const DEFAULT_DRM_ROOT: &str = "/sys/class/drm";

fn truthy(v: &str) -> bool {
    v == "1" || v.eq_ignore_ascii_case("true")
}

/// Parses a boolean-ish override value ("1" / "true", case-insensitive).
pub fn flag_value(v: Option<&str>) -> bool {
    v.map(truthy).unwrap_or(false)
}

pub fn hwprof_debug() -> bool {
    flag_value(std::env::var("SUBSAI_HWPROF_DEBUG").ok().as_deref())
}

pub fn disable_key(name: &str) -> String {
    format!("SUBSAI_HWPROF_DISABLE_{}", name.to_ascii_uppercase())
}

pub fn disabled(name: &str) -> bool {
    flag_value(std::env::var(disable_key(name)).ok().as_deref())
}

/// Unset or empty falls back to the real sysfs tree.
pub fn drm_root_from(value: Option<OsString>) -> PathBuf {
    value
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DRM_ROOT))
}

pub fn drm_root() -> PathBuf {
    drm_root_from(std::env::var_os("SUBSAI_HWPROF_DRM_ROOT"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_values() {
        assert!(flag_value(Some("1")));
        assert!(flag_value(Some("TRUE")));
        assert!(flag_value(Some("true")));
        assert!(!flag_value(Some("0")));
        assert!(!flag_value(Some("yes")));
        assert!(!flag_value(None));
    }

    #[test]
    fn disable_keys_are_upper_case() {
        assert_eq!(disable_key("cuda"), "SUBSAI_HWPROF_DISABLE_CUDA");
        assert_eq!(disable_key("Mps"), "SUBSAI_HWPROF_DISABLE_MPS");
    }

    #[test]
    fn drm_root_falls_back_when_unset_or_empty() {
        assert_eq!(drm_root_from(None), PathBuf::from(DEFAULT_DRM_ROOT));
        assert_eq!(
            drm_root_from(Some(OsString::new())),
            PathBuf::from(DEFAULT_DRM_ROOT)
        );
        assert_eq!(
            drm_root_from(Some(OsString::from("/tmp/fake-drm"))),
            PathBuf::from("/tmp/fake-drm")
        );
    }
}
