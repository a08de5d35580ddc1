//! # Config Commands
//!
//! Commands for retrieving storefront configuration.

use tracing::debug;

use crate::state::ConfigState;

/// Gets the current storefront configuration.
///
/// ## When Used
/// - Startup (store name, currency symbol)
/// - Rendering cart lines without an image (fallback image)
///
/// ## Returns
/// Complete configuration state (read-only)
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_serializes_camel_case() {
        let json = serde_json::to_value(get_config(&ConfigState::default())).unwrap();
        assert_eq!(json["deliveryFee"], "4.99");
        assert_eq!(json["taxRateBps"], 1800);
        assert_eq!(json["cartKey"], "paradise_cart_v1");
    }
}
