//! Assembly of the final genesis document from a template and a computed allocation.
//!
//! Each merge policy is its own operation; [`assemble`] only dispatches on a [`MergePolicy`]
//! chosen by the caller.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use tracing::{debug, warn};

use crate::{
    codec::encode_address,
    errors::{GenesisError, GenesisResult},
    types::{AllocationMap, EncodedAlloc, GenesisDocument, GenesisTemplate},
};

/// Template field that must always be present and is passed through untouched.
pub const CONFIG_FIELD: &str = "config";

/// How a computed allocation is combined with the template's own `alloc`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MergePolicy {
    /// Computed entries win; template entries only add addresses not already present.
    #[default]
    AllocAuthoritative,

    /// Template entries win on conflict; computed entries fill in the rest.
    TemplatePreferred,

    /// The `alloc` is built from the computed allocation alone.
    FullGenesis,
}

impl MergePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllocAuthoritative => "alloc-authoritative",
            Self::TemplatePreferred => "template-preferred",
            Self::FullGenesis => "full-genesis",
        }
    }
}

impl FromStr for MergePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "alloc-authoritative" => Ok(Self::AllocAuthoritative),
            "template-preferred" => Ok(Self::TemplatePreferred),
            "full-genesis" => Ok(Self::FullGenesis),
            _ => Err(format!(
                "unknown merge policy: {s} (expected alloc-authoritative, template-preferred or \
                 full-genesis)"
            )),
        }
    }
}

impl Display for MergePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Hex-encodes every record of `alloc`, keyed by canonical address.
pub fn encode_alloc(alloc: &AllocationMap) -> EncodedAlloc {
    alloc
        .iter()
        .map(|(address, record)| (encode_address(address), record.to_genesis_account()))
        .collect()
}

/// Assembles a genesis document with the given policy.
pub fn assemble(
    template: GenesisTemplate,
    computed: &AllocationMap,
    policy: MergePolicy,
) -> GenesisResult<GenesisDocument> {
    debug!(%policy, computed = computed.len(), "assembling genesis document");
    match policy {
        MergePolicy::AllocAuthoritative => assemble_alloc_authoritative(template, computed),
        MergePolicy::TemplatePreferred => assemble_template_preferred(template, computed),
        MergePolicy::FullGenesis => assemble_full_genesis(template, computed),
    }
}

/// Writes `computed` first, then adds template entries for addresses it does not cover.
pub fn assemble_alloc_authoritative(
    template: GenesisTemplate,
    computed: &AllocationMap,
) -> GenesisResult<GenesisDocument> {
    let mut alloc = encode_alloc(computed);
    let mut shadowed = 0usize;
    for (key, account) in encode_alloc(&template.alloc) {
        if alloc.contains_key(&key) {
            shadowed += 1;
            continue;
        }
        alloc.insert(key, account);
    }
    if shadowed > 0 {
        debug!(shadowed, "computed entries replaced template alloc entries");
    }

    into_document(template, alloc)
}

/// Starts from the template's entries and only adds computed entries for new addresses.
pub fn assemble_template_preferred(
    template: GenesisTemplate,
    computed: &AllocationMap,
) -> GenesisResult<GenesisDocument> {
    let mut alloc = encode_alloc(&template.alloc);
    for (key, account) in encode_alloc(computed) {
        alloc.entry(key).or_insert(account);
    }

    into_document(template, alloc)
}

/// Builds `alloc` from `computed` only, without consulting the template allocation.
pub fn assemble_full_genesis(
    template: GenesisTemplate,
    computed: &AllocationMap,
) -> GenesisResult<GenesisDocument> {
    if !template.alloc.is_empty() {
        warn!(
            ignored = template.alloc.len(),
            "template alloc entries ignored by full-genesis assembly"
        );
    }

    let alloc = encode_alloc(computed);
    into_document(template, alloc)
}

fn into_document(template: GenesisTemplate, alloc: EncodedAlloc) -> GenesisResult<GenesisDocument> {
    let mut header = template.fields;
    let config = header
        .remove(CONFIG_FIELD)
        .ok_or(GenesisError::MissingTemplateField(CONFIG_FIELD))?;

    Ok(GenesisDocument {
        config,
        alloc,
        header,
    })
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Address, Bytes, U256};
    use serde_json::{json, Map, Value};

    use super::*;
    use crate::types::{AccountInfo, AccountRecord, StorageMap};

    fn record(balance: u64) -> AccountRecord {
        AccountRecord {
            info: AccountInfo {
                balance: U256::from(balance),
                nonce: 0,
                code: None,
            },
            storage: StorageMap::new(),
        }
    }

    fn template(alloc: AllocationMap) -> GenesisTemplate {
        let fields = match json!({
            "config": { "chainId": 1 },
            "gasLimit": "0x80000000",
            "timestamp": "0x0",
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        GenesisTemplate { fields, alloc }
    }

    fn balance_of(doc: &GenesisDocument, address: Address) -> &str {
        &doc.alloc[&encode_address(&address)].balance
    }

    #[test]
    fn test_alloc_authoritative_keeps_computed_on_conflict() {
        let a = Address::repeat_byte(0xaa);
        let b = Address::repeat_byte(0xbb);
        let computed = AllocationMap::from([(a, record(1))]);
        let tmpl = template(AllocationMap::from([(a, record(2)), (b, record(3))]));

        let doc = assemble_alloc_authoritative(tmpl, &computed).unwrap();
        assert_eq!(doc.alloc.len(), 2);
        assert_eq!(balance_of(&doc, a), "0x1");
        assert_eq!(balance_of(&doc, b), "0x3");
    }

    #[test]
    fn test_template_preferred_keeps_template_on_conflict() {
        let a = Address::repeat_byte(0xaa);
        let b = Address::repeat_byte(0xbb);
        let c = Address::repeat_byte(0xcc);
        let computed = AllocationMap::from([(a, record(1)), (c, record(4))]);
        let tmpl = template(AllocationMap::from([(a, record(2)), (b, record(3))]));

        let doc = assemble_template_preferred(tmpl, &computed).unwrap();
        assert_eq!(doc.alloc.len(), 3);
        assert_eq!(balance_of(&doc, a), "0x2");
        assert_eq!(balance_of(&doc, b), "0x3");
        assert_eq!(balance_of(&doc, c), "0x4");
    }

    #[test]
    fn test_full_genesis_ignores_template_alloc() {
        let a = Address::repeat_byte(0xaa);
        let b = Address::repeat_byte(0xbb);
        let computed = AllocationMap::from([(a, record(1))]);
        let tmpl = template(AllocationMap::from([(b, record(3))]));

        let doc = assemble_full_genesis(tmpl, &computed).unwrap();
        assert_eq!(doc.alloc.len(), 1);
        assert_eq!(balance_of(&doc, a), "0x1");
    }

    #[test]
    fn test_empty_template_alloc_yields_encoded_computed() {
        let a = Address::repeat_byte(0xaa);
        let mut contract = record(1_000_000);
        contract.info.nonce = 16;
        contract.info.code = Some(Bytes::from_static(&[0x60, 0x01]));
        contract.storage.insert(U256::ZERO, U256::from(255));
        let computed = AllocationMap::from([(a, contract)]);

        for policy in [
            MergePolicy::AllocAuthoritative,
            MergePolicy::TemplatePreferred,
            MergePolicy::FullGenesis,
        ] {
            let doc = assemble(template(AllocationMap::new()), &computed, policy).unwrap();
            assert_eq!(doc.alloc, encode_alloc(&computed), "policy {policy}");

            let account = &doc.alloc[&encode_address(&a)];
            assert_eq!(account.balance, "0xf4240");
            assert_eq!(account.nonce, "0x10");
            assert_eq!(account.code.as_deref(), Some("0x6001"));
            assert_eq!(account.storage["0x0"], "0xff");
        }
    }

    #[test]
    fn test_header_and_config_pass_through() {
        let doc = assemble(
            template(AllocationMap::new()),
            &AllocationMap::new(),
            MergePolicy::default(),
        )
        .unwrap();
        assert_eq!(doc.config, json!({ "chainId": 1 }));
        assert_eq!(doc.header.get("gasLimit"), Some(&json!("0x80000000")));
        assert_eq!(doc.header.get("timestamp"), Some(&json!("0x0")));
        assert!(!doc.header.contains_key("config"));
    }

    #[test]
    fn test_missing_config_is_reported() {
        let tmpl = GenesisTemplate {
            fields: Map::new(),
            alloc: AllocationMap::new(),
        };
        let err = assemble(tmpl, &AllocationMap::new(), MergePolicy::FullGenesis).unwrap_err();
        assert!(matches!(err, GenesisError::MissingTemplateField("config")));
    }

    #[test]
    fn test_merge_policy_parse_and_display() {
        for policy in [
            MergePolicy::AllocAuthoritative,
            MergePolicy::TemplatePreferred,
            MergePolicy::FullGenesis,
        ] {
            assert_eq!(policy.to_string().parse::<MergePolicy>(), Ok(policy));
        }
        assert_eq!(
            "Full-Genesis".parse::<MergePolicy>(),
            Ok(MergePolicy::FullGenesis)
        );
        assert!("newest-wins".parse::<MergePolicy>().is_err());
    }
}
