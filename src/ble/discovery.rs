//! Advertisement filter that selects the target peripheral by name.

use super::{AdvertisedDevice, MatchSignal, ScanControl};

/// Matches advertisements against a target name, once per scan session.
///
/// Create a fresh filter for every scan; after the first match the filter
/// is spent and ignores everything that follows.
pub struct DiscoveryFilter<'a> {
    target_name: &'a str,
    matched: bool,
}

impl<'a> DiscoveryFilter<'a> {
    pub const fn new(target_name: &'a str) -> Self {
        Self {
            target_name,
            matched: false,
        }
    }

    /// Whether this session has already produced its match.
    pub fn has_matched(&self) -> bool {
        self.matched
    }

    /// Inspect one advertisement.
    ///
    /// On the first exact (case-sensitive) name match the scan is stopped,
    /// its buffered results cleared, and the advertiser's address returned.
    pub fn on_advertisement<A: Copy>(
        &mut self,
        device: &AdvertisedDevice<A>,
        scan: &mut impl ScanControl,
    ) -> Option<MatchSignal<A>> {
        if self.matched || device.name.as_str() != self.target_name {
            return None;
        }

        scan.stop();
        scan.clear_results();
        self.matched = true;
        Some(MatchSignal::new(device.address))
    }
}
