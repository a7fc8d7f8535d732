//! Per-entity search configuration.
//!
//! The registry replaces the original run-time type switches with a
//! single lookup: each entity type maps to a bundle of physical
//! indices, scoring strategies with named boosts, named sort
//! definitions, and structural filter field mappings. Catalogues are
//! built once at startup and never mutated.

use std::collections::BTreeMap;

use crate::error::{HearthError, Result};
use crate::query::{Fuzziness, MatchOperator, MultiMatchType};
use crate::request::EntityType;

/// Default relative boosts: exactness and specificity outrank breadth.
pub mod boost {
    /// Verbatim identifier/postcode equality.
    pub const EXACT: f32 = 10.0;
    /// Names split across fields, and sub-document matches.
    pub const CROSS_FIELDS: f32 = 6.0;
    /// Sub-document member matching.
    pub const NESTED_MEMBER: f32 = 5.0;
    /// Best single field, typo-tolerant.
    pub const BEST_FIELDS: f32 = 4.0;
    /// Breadth across many fields.
    pub const MOST_FIELDS: f32 = 2.0;
    /// Partial substring hits.
    pub const WILDCARD: f32 = 1.0;
}

/// One configured matching strategy for an entity type.
#[derive(Debug, Clone)]
pub enum Strategy {
    /// Verbatim term equality over the fields.
    Exact { fields: Vec<String>, boost: f32 },
    /// Per-word wildcard equality. `inexact_only_fields` are dropped
    /// when the request asks for exact matching.
    Wildcard {
        fields: Vec<String>,
        inexact_only_fields: Vec<String>,
        boost: f32,
    },
    /// Single best-matching field, all words required.
    BestFields {
        fields: Vec<String>,
        fuzziness: Option<Fuzziness>,
        boost: f32,
    },
    /// Field set treated as one combined field, any word suffices.
    CrossFields { fields: Vec<String>, boost: f32 },
    /// Scores summed across matching fields.
    MostFields {
        fields: Vec<String>,
        fuzziness: Option<Fuzziness>,
        boost: f32,
    },
    /// Multi-match confined to one sub-document instance.
    Nested {
        path: String,
        fields: Vec<String>,
        match_type: MultiMatchType,
        operator: MatchOperator,
        fuzziness: Option<Fuzziness>,
        boost: f32,
    },
}

fn fields(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// The search configuration for one entity type.
#[derive(Debug, Clone)]
pub struct EntityProfile {
    entity_type: EntityType,
    indices: Vec<String>,
    strategies: Vec<Strategy>,
    sorts: BTreeMap<String, Vec<String>>,
    filter_fields: BTreeMap<String, Vec<String>>,
}

impl EntityProfile {
    /// Create a profile targeting the given physical indices.
    pub fn new<I>(entity_type: EntityType, indices: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        EntityProfile {
            entity_type,
            indices: indices.into_iter().map(Into::into).collect(),
            strategies: Vec::new(),
            sorts: BTreeMap::new(),
            filter_fields: BTreeMap::new(),
        }
    }

    /// Add a scoring strategy.
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategies.push(strategy);
        self
    }

    /// Register a named sort definition: the field sequence applied,
    /// in order, for stable tie-breaking.
    pub fn sort(mut self, key: &str, sort_fields: &[&str]) -> Self {
        self.sorts.insert(key.to_string(), fields(sort_fields));
        self
    }

    /// Map a structural filter name to the document fields it narrows.
    pub fn filter(mut self, name: &str, filter_fields: &[&str]) -> Self {
        self.filter_fields
            .insert(name.to_string(), fields(filter_fields));
        self
    }

    /// The entity type this profile configures.
    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    /// The physical collections this entity is stored in.
    pub fn indices(&self) -> &[String] {
        &self.indices
    }

    /// The configured scoring strategies.
    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// The field sequence for a named sort definition.
    pub fn sort_fields(&self, key: &str) -> Option<&[String]> {
        self.sorts.get(key).map(Vec::as_slice)
    }

    /// The document fields for a structural filter name.
    pub fn filter_fields(&self, name: &str) -> Option<&[String]> {
        self.filter_fields.get(name).map(Vec::as_slice)
    }
}

/// The startup-initialized catalogue of entity profiles.
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    profiles: BTreeMap<EntityType, EntityProfile>,
}

impl ProfileRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a profile, replacing any existing one for the entity.
    pub fn register(&mut self, profile: EntityProfile) {
        self.profiles.insert(profile.entity_type(), profile);
    }

    /// Look up the profile for an entity type.
    ///
    /// A missing entry is a deployment defect, not a caller error.
    pub fn profile(&self, entity_type: EntityType) -> Result<&EntityProfile> {
        self.profiles.get(&entity_type).ok_or_else(|| {
            HearthError::configuration(format!("no profile registered for '{entity_type}'"))
        })
    }

    /// Resolve the physical collections for an entity type.
    pub fn indices(&self, entity_type: EntityType) -> Result<&[String]> {
        let profile = self.profile(entity_type)?;
        if profile.indices.is_empty() {
            return Err(HearthError::configuration(format!(
                "profile for '{entity_type}' maps to no indices"
            )));
        }
        Ok(profile.indices())
    }

    /// The standard housing-search configuration, one profile per
    /// entity type.
    pub fn standard() -> Self {
        let mut registry = ProfileRegistry::new();

        registry.register(
            EntityProfile::new(EntityType::Person, ["persons"])
                .strategy(Strategy::Exact {
                    fields: fields(&["id"]),
                    boost: boost::EXACT,
                })
                .strategy(Strategy::CrossFields {
                    fields: fields(&["firstname", "surname"]),
                    boost: boost::CROSS_FIELDS,
                })
                .strategy(Strategy::Nested {
                    path: "tenures".to_string(),
                    fields: fields(&[
                        "tenures.assetFullAddress",
                        "tenures.paymentReference",
                        "tenures.uprn",
                    ]),
                    match_type: MultiMatchType::CrossFields,
                    operator: MatchOperator::Or,
                    fuzziness: None,
                    boost: boost::CROSS_FIELDS,
                })
                .strategy(Strategy::BestFields {
                    fields: fields(&[
                        "firstname",
                        "surname",
                        "middleName",
                        "preferredFirstname",
                        "preferredSurname",
                        "dateOfBirth",
                    ]),
                    fuzziness: Some(Fuzziness::Auto),
                    boost: boost::BEST_FIELDS,
                })
                .strategy(Strategy::MostFields {
                    fields: fields(&[
                        "firstname",
                        "surname",
                        "middleName",
                        "preferredFirstname",
                        "preferredSurname",
                    ]),
                    fuzziness: Some(Fuzziness::Auto),
                    boost: boost::MOST_FIELDS,
                })
                .strategy(Strategy::Wildcard {
                    fields: fields(&[
                        "firstname",
                        "surname",
                        "middleName",
                        "preferredFirstname",
                        "preferredSurname",
                        "dateOfBirth",
                    ]),
                    inexact_only_fields: Vec::new(),
                    boost: boost::WILDCARD,
                })
                .sort("surname", &["surname", "firstname"])
                .filter("personTypes", &["personTypes"]),
        );

        registry.register(
            EntityProfile::new(EntityType::Asset, ["assets"])
                .strategy(Strategy::Exact {
                    fields: fields(&[
                        "assetAddress.addressLine1",
                        "assetAddress.uprn",
                        "assetAddress.postCode",
                    ]),
                    boost: boost::EXACT,
                })
                .strategy(Strategy::Wildcard {
                    fields: fields(&["assetAddress.postCode", "assetAddress.uprn"]),
                    inexact_only_fields: fields(&["assetAddress.addressLine1"]),
                    boost: boost::WILDCARD,
                })
                .sort("addressLine1", &["assetAddress.addressLine1"])
                .filter("assetTypes", &["assetType"]),
        );

        registry.register(
            EntityProfile::new(EntityType::Tenure, ["tenures"])
                .strategy(Strategy::Exact {
                    fields: fields(&["paymentReference", "id"]),
                    boost: boost::EXACT,
                })
                .strategy(Strategy::CrossFields {
                    fields: fields(&["tenuredAsset.fullAddress"]),
                    boost: boost::CROSS_FIELDS,
                })
                .strategy(Strategy::Nested {
                    path: "householdMembers".to_string(),
                    fields: fields(&["householdMembers.fullName"]),
                    match_type: MultiMatchType::BestFields,
                    operator: MatchOperator::And,
                    fuzziness: Some(Fuzziness::Auto),
                    boost: boost::NESTED_MEMBER,
                })
                .strategy(Strategy::Wildcard {
                    fields: fields(&["paymentReference", "tenuredAsset.fullAddress"]),
                    inexact_only_fields: Vec::new(),
                    boost: boost::WILDCARD,
                })
                .sort("paymentReference", &["paymentReference"]),
        );

        registry.register(
            EntityProfile::new(EntityType::Account, ["accounts"])
                .strategy(Strategy::Exact {
                    fields: fields(&["paymentReference", "accountNumber"]),
                    boost: boost::EXACT,
                })
                .strategy(Strategy::Wildcard {
                    fields: fields(&["paymentReference", "accountNumber"]),
                    inexact_only_fields: Vec::new(),
                    boost: boost::WILDCARD,
                })
                .sort("accountNumber", &["accountNumber"]),
        );

        registry.register(
            EntityProfile::new(EntityType::Transaction, ["transactions"])
                .strategy(Strategy::Exact {
                    fields: fields(&["transactionNumber", "paymentReference"]),
                    boost: boost::EXACT,
                })
                .strategy(Strategy::BestFields {
                    fields: fields(&["sender.fullName"]),
                    fuzziness: Some(Fuzziness::Auto),
                    boost: boost::BEST_FIELDS,
                })
                .strategy(Strategy::Wildcard {
                    fields: fields(&[
                        "transactionNumber",
                        "paymentReference",
                        "bankAccountNumber",
                    ]),
                    inexact_only_fields: Vec::new(),
                    boost: boost::WILDCARD,
                })
                .sort("transactionNumber", &["transactionNumber"]),
        );

        registry.register(
            EntityProfile::new(EntityType::Staff, ["staff"])
                .strategy(Strategy::CrossFields {
                    fields: fields(&["firstName", "lastName"]),
                    boost: boost::CROSS_FIELDS,
                })
                .strategy(Strategy::BestFields {
                    fields: fields(&["firstName", "lastName", "emailAddress"]),
                    fuzziness: Some(Fuzziness::Auto),
                    boost: boost::BEST_FIELDS,
                })
                .strategy(Strategy::Wildcard {
                    fields: fields(&["firstName", "lastName", "emailAddress"]),
                    inexact_only_fields: Vec::new(),
                    boost: boost::WILDCARD,
                })
                .sort("lastName", &["lastName", "firstName"]),
        );

        registry.register(
            EntityProfile::new(EntityType::Process, ["processes"])
                .strategy(Strategy::Exact {
                    fields: fields(&["id", "targetId"]),
                    boost: boost::EXACT,
                })
                .strategy(Strategy::BestFields {
                    fields: fields(&["processName", "patchAssignment.patchName"]),
                    fuzziness: Some(Fuzziness::Auto),
                    boost: boost::BEST_FIELDS,
                })
                .strategy(Strategy::Wildcard {
                    fields: fields(&["targetId", "processName"]),
                    inexact_only_fields: Vec::new(),
                    boost: boost::WILDCARD,
                })
                .sort("processName", &["processName"]),
        );

        registry
    }
}
