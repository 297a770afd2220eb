#![allow(non_snake_case)]

use anyhow::{anyhow, bail, Context, Result};
use libloading::{Library, Symbol};

#[allow(non_camel_case_types)]
type CuInit = unsafe extern "C" fn(u32) -> i32;
#[allow(non_camel_case_types)]
type CuOutParam = unsafe extern "C" fn(*mut i32) -> i32;

#[cfg(target_os = "linux")]
const CANDIDATES: &[&str] = &["libcuda.so.1", "libcuda.so"];
#[cfg(target_os = "windows")]
const CANDIDATES: &[&str] = &["nvcuda.dll"];

/// What the CUDA driver reports after `cuInit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CudaDriver {
    pub devices: usize,
    pub version: Option<String>,
}

fn open_driver() -> Result<Library> {
    let mut errors = Vec::new();
    for name in CANDIDATES {
        match unsafe { Library::new(name) } {
            Ok(lib) => return Ok(lib),
            Err(e) => errors.push(format!("{name}: {e}")),
        }
    }
    Err(anyhow!("no CUDA driver library ({})", errors.join("; ")))
}

/// Loads the driver and asks it for the device count. Any failure means "no CUDA".
pub fn probe_driver() -> Result<CudaDriver> {
    let lib = open_driver()?;
    unsafe {
        let cuInit: Symbol<CuInit> = lib.get(b"cuInit").context("get cuInit")?;
        let cuDeviceGetCount: Symbol<CuOutParam> = lib
            .get(b"cuDeviceGetCount")
            .context("get cuDeviceGetCount")?;

        let rc = cuInit(0);
        if rc != 0 {
            bail!("cuInit failed ({rc})");
        }
        let mut cnt = 0i32;
        let rc = cuDeviceGetCount(&mut cnt);
        if rc != 0 {
            bail!("cuDeviceGetCount failed ({rc})");
        }

        // Version is informational only; a missing symbol is not a probe failure.
        let version = lib
            .get::<CuOutParam>(b"cuDriverGetVersion")
            .ok()
            .and_then(|get_version| {
                let mut ver = 0i32;
                (get_version(&mut ver) == 0).then_some(ver)
            })
            .and_then(driver_version);

        Ok(CudaDriver {
            devices: usize::try_from(cnt).unwrap_or(0),
            version,
        })
    }
}

/// `cuDriverGetVersion` encodes 12.4 as 12040.
pub fn driver_version(raw: i32) -> Option<String> {
    (raw > 0).then(|| format!("{}.{}", raw / 1000, (raw % 1000) / 10))
}
