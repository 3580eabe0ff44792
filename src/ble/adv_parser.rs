use heapless::String;

/// AD type: Shortened Local Name.
const AD_TYPE_SHORT_NAME: u8 = 0x08;
/// AD type: Complete Local Name.
const AD_TYPE_COMPLETE_NAME: u8 = 0x09;

/// Extract complete/shortened local name from advertisement data.
///
/// Returns `None` when no name AD structure is present. Names longer than
/// 32 bytes are truncated.
pub fn extract_device_name(data: &[u8]) -> Option<String<32>> {
    let mut i = 0;
    while i < data.len() {
        let len = data[i] as usize;
        if len == 0 || i + len >= data.len() {
            break;
        }
        let ad_type = data[i + 1];
        if ad_type == AD_TYPE_SHORT_NAME || ad_type == AD_TYPE_COMPLETE_NAME {
            let name_bytes = &data[i + 2..i + 1 + len];
            let mut name = String::new();
            for &b in name_bytes {
                if name.push(b as char).is_err() {
                    break;
                }
            }
            return Some(name);
        }
        i += len + 1;
    }
    None
}
