//! Built-in genesis template used when no template file is supplied.

use serde_json::{json, Map, Value};

use crate::{loader::template_from_fields, types::GenesisTemplate};

/// Chain id of the built-in template.
pub const DEFAULT_CHAIN_ID: u64 = 1;

/// Block gas limit of the built-in template.
pub const DEFAULT_GAS_LIMIT: &str = "0x80000000";

const ZERO_HASH: &str = "0x0000000000000000000000000000000000000000000000000000000000000000";
const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Returns a dev-chain template with every fork active from genesis and an empty `alloc`.
pub fn default_genesis_template() -> GenesisTemplate {
    let config = json!({
        "chainId": DEFAULT_CHAIN_ID,
        "homesteadBlock": 0,
        "eip150Block": 0,
        "eip150Hash": ZERO_HASH,
        "eip155Block": 0,
        "eip158Block": 0,
        "byzantiumBlock": 0,
        "constantinopleBlock": 0,
        "petersburgBlock": 0,
        "istanbulBlock": 0,
        "muirGlacierBlock": 0,
        "berlinBlock": 0,
        "londonBlock": 0,
        "arrowGlacierBlock": 0,
        "grayGlacierBlock": 0,
        "mergeForkBlock": 0,
        "shanghaiTime": 0,
        "cancunTime": 0,
        "gravity": {
            "gravityBlock": 0,
        },
    });

    let mut fields = Map::new();
    fields.insert("config".to_owned(), config);
    for (key, value) in [
        ("nonce", "0x0000000000000000"),
        ("timestamp", "0x0"),
        ("extraData", ZERO_HASH),
        ("gasLimit", DEFAULT_GAS_LIMIT),
        ("difficulty", "0x1"),
        ("mixHash", ZERO_HASH),
        ("coinbase", ZERO_ADDRESS),
        ("number", "0x0"),
        ("gasUsed", "0x0"),
        ("parentHash", ZERO_HASH),
        ("baseFeePerGas", "0x0"),
    ] {
        fields.insert(key.to_owned(), Value::String(value.to_owned()));
    }

    template_from_fields(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_shape() {
        let template = default_genesis_template();
        assert!(template.alloc.is_empty());
        assert!(!template.fields.contains_key("alloc"));
        assert_eq!(
            template.fields["config"],
            json!({
                "chainId": 1,
                "homesteadBlock": 0,
                "eip150Block": 0,
                "eip150Hash": ZERO_HASH,
                "eip155Block": 0,
                "eip158Block": 0,
                "byzantiumBlock": 0,
                "constantinopleBlock": 0,
                "petersburgBlock": 0,
                "istanbulBlock": 0,
                "muirGlacierBlock": 0,
                "berlinBlock": 0,
                "londonBlock": 0,
                "arrowGlacierBlock": 0,
                "grayGlacierBlock": 0,
                "mergeForkBlock": 0,
                "shanghaiTime": 0,
                "cancunTime": 0,
                "gravity": { "gravityBlock": 0 }
            })
        );
        assert_eq!(template.fields["gasLimit"], json!("0x80000000"));
        assert_eq!(template.fields["difficulty"], json!("0x1"));
        assert_eq!(template.fields.len(), 12);
    }
}
