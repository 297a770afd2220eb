use serde::{Deserialize, Serialize};

use crate::backend::{ComputeBackend, LiveBackend};

/// Ordered device identifiers: "cpu", then "mps" if usable, then "cuda:<i>".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceList(Vec<String>);

impl DeviceList {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, device: &str) -> bool {
        self.0.iter().any(|d| d == device)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl<'a> IntoIterator for &'a DeviceList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

pub fn get_available_devices() -> DeviceList {
    available_devices(&LiveBackend::from_env())
}

pub fn available_devices(backend: &dyn ComputeBackend) -> DeviceList {
    let mut devices = vec!["cpu".to_string()];
    if backend.has_mps() {
        devices.push("mps".to_string());
    }
    devices.extend((0..backend.cuda_device_count()).map(|i| format!("cuda:{i}")));
    DeviceList(devices)
}
