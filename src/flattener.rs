//! Trade flattening module
//!
//! Turns nested trade records (one contract-level field group plus any number
//! of named leg-level field groups) into flat rows, one row per leg. Contract
//! values are repeated on every row of their trade.

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use crate::config::LayoutConfig;
use crate::error::{json_type_name, MalformedInputError};
use crate::writer::FlatRow;

pub const CONTRACT_PREFIX: &str = "Contract";
pub const LEG_PREFIX: &str = "Leg";
/// Synthetic column carrying the leg identifier
pub const LEG_NUMBER_COLUMN: &str = "Leg_Number";

/// Ordered mapping of field name to value
pub type FieldGroup = IndexMap<String, Value>;

/// Derive a column name from a source field name.
///
/// Produces `<prefix>_<field>` where every space and hyphen in `field` becomes
/// an underscore. All other characters are kept as-is.
pub fn column_name(prefix: &str, field: &str) -> String {
    let normalized: String = field
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect();
    format!("{}_{}", prefix, normalized)
}

/// One trade as read from the input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeRecord {
    pub contract_fields: FieldGroup,
    /// Leg identifier -> leg fields, in declaration order
    pub leg_fields: IndexMap<String, FieldGroup>,
}

impl TradeRecord {
    /// Build a trade from its decoded JSON form.
    ///
    /// A missing group is treated as empty. A group (or leg) that is present
    /// but not an object is rejected.
    pub fn from_value(
        index: usize,
        value: &Value,
        layout: &LayoutConfig,
    ) -> Result<Self, MalformedInputError> {
        let Value::Object(obj) = value else {
            return Err(MalformedInputError::TradeNotObject {
                index,
                found: json_type_name(value),
            });
        };

        let contract_fields = match obj.get(&layout.contract_group) {
            None => FieldGroup::new(),
            Some(group) => field_group(group).ok_or_else(|| MalformedInputError::GroupNotObject {
                index,
                group: layout.contract_group.clone(),
                found: json_type_name(group),
            })?,
        };

        let mut leg_fields = IndexMap::new();
        if let Some(group) = obj.get(&layout.leg_group) {
            let Value::Object(legs) = group else {
                return Err(MalformedInputError::GroupNotObject {
                    index,
                    group: layout.leg_group.clone(),
                    found: json_type_name(group),
                });
            };

            for (leg, leg_value) in legs {
                let fields = field_group(leg_value).ok_or_else(|| MalformedInputError::LegNotObject {
                    index,
                    leg: leg.clone(),
                    found: json_type_name(leg_value),
                })?;
                leg_fields.insert(leg.clone(), fields);
            }
        }

        Ok(Self {
            contract_fields,
            leg_fields,
        })
    }

    pub fn leg_count(&self) -> usize {
        self.leg_fields.len()
    }
}

fn field_group(value: &Value) -> Option<FieldGroup> {
    match value {
        Value::Object(map) => Some(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()),
        _ => None,
    }
}

/// Validate the decoded input root and convert every trade.
///
/// Fails on the first malformed trade; nothing is returned for the others.
pub fn parse_trades(
    root: &Value,
    layout: &LayoutConfig,
) -> Result<Vec<TradeRecord>, MalformedInputError> {
    let Value::Array(items) = root else {
        return Err(MalformedInputError::RootNotArray {
            found: json_type_name(root),
        });
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| TradeRecord::from_value(index, item, layout))
        .collect()
}

/// Flatten a single trade into one row per leg.
///
/// Row layout: contract columns, then `Leg_Number`, then leg columns. When two
/// source names derive the same column the later value wins and the column
/// keeps its first position.
pub fn flatten_trade(trade: &TradeRecord) -> Vec<FlatRow> {
    let contract_columns: Vec<(String, &Value)> = trade
        .contract_fields
        .iter()
        .map(|(field, value)| (column_name(CONTRACT_PREFIX, field), value))
        .collect();

    trade
        .leg_fields
        .iter()
        .map(|(leg, fields)| {
            let mut row = FlatRow::with_capacity(contract_columns.len() + fields.len() + 1);
            for (column, value) in &contract_columns {
                row.insert(column.clone(), (*value).clone());
            }
            row.insert(LEG_NUMBER_COLUMN.to_string(), Value::String(leg.clone()));
            for (field, value) in fields {
                row.insert(column_name(LEG_PREFIX, field), value.clone());
            }
            row
        })
        .collect()
}

/// Flatten trades in input order
pub fn flatten(trades: &[TradeRecord]) -> Vec<FlatRow> {
    trades.iter().flat_map(flatten_trade).collect()
}

/// Flattener bound to a particular input layout
#[derive(Debug, Clone, Default)]
pub struct Flattener {
    layout: LayoutConfig,
}

impl Flattener {
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Parse the decoded input into trade records
    pub fn parse(&self, root: &Value) -> Result<Vec<TradeRecord>, MalformedInputError> {
        let trades = parse_trades(root, &self.layout)?;
        debug!(
            "Parsed {} trades with {} legs in total",
            trades.len(),
            trades.iter().map(TradeRecord::leg_count).sum::<usize>()
        );
        Ok(trades)
    }

    /// Validate the whole input, then flatten it
    pub fn flatten_value(&self, root: &Value) -> Result<Vec<FlatRow>, MalformedInputError> {
        let trades = self.parse(root)?;
        Ok(flatten(&trades))
    }
}
