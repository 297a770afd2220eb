/// Whether a Metal device is usable. Backs the MPS "available" fact.
pub fn metal_available() -> bool {
    let ok = metal::Device::system_default().is_some();
    if !ok {
        log::debug!("[metal] no_device");
    }
    ok
}
