//! Printable views of decoded contract output.
//!
//! Integers are serialized as decimal strings and addresses in checksummed
//! form, field order follows the contract's declaration.

use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Address, U256};
use serde::{Serialize, Serializer};

use crate::blockchain::address::checksummed;
use crate::contracts::diamond::partyAStatsReturn;
use crate::contracts::multiaccount::Account;

fn decimal<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

fn checksum<S: Serializer>(value: &Address, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&checksummed(value))
}

fn checksum_list<S: Serializer>(values: &[Address], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(values.iter().map(checksummed))
}

/// Account state of a party A, as returned by `partyAStats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyAStats {
    pub liquidation_status: bool,
    #[serde(serialize_with = "decimal")]
    pub allocated_balances: U256,
    #[serde(rename = "lockedCVA", serialize_with = "decimal")]
    pub locked_cva: U256,
    #[serde(rename = "lockedLF", serialize_with = "decimal")]
    pub locked_lf: U256,
    #[serde(serialize_with = "decimal")]
    pub locked_party_amm: U256,
    #[serde(serialize_with = "decimal")]
    pub locked_party_bmm: U256,
    #[serde(rename = "pendingLockedCVA", serialize_with = "decimal")]
    pub pending_locked_cva: U256,
    #[serde(rename = "pendingLockedLF", serialize_with = "decimal")]
    pub pending_locked_lf: U256,
    #[serde(serialize_with = "decimal")]
    pub pending_locked_party_amm: U256,
    #[serde(serialize_with = "decimal")]
    pub pending_locked_party_bmm: U256,
    #[serde(rename = "partyAPositionsCount", serialize_with = "decimal")]
    pub party_a_positions_count: U256,
    #[serde(rename = "partyAPendingQuotesCount", serialize_with = "decimal")]
    pub party_a_pending_quotes_count: U256,
    #[serde(rename = "partyANonces", serialize_with = "decimal")]
    pub party_a_nonces: U256,
    #[serde(serialize_with = "decimal")]
    pub quote_ids_count: U256,
}

impl From<partyAStatsReturn> for PartyAStats {
    fn from(r: partyAStatsReturn) -> Self {
        Self {
            liquidation_status: r.liquidationStatus,
            allocated_balances: r.allocatedBalances,
            locked_cva: r.lockedCVA,
            locked_lf: r.lockedLF,
            locked_party_amm: r.lockedPartyAmm,
            locked_party_bmm: r.lockedPartyBmm,
            pending_locked_cva: r.pendingLockedCVA,
            pending_locked_lf: r.pendingLockedLF,
            pending_locked_party_amm: r.pendingLockedPartyAmm,
            pending_locked_party_bmm: r.pendingLockedPartyBmm,
            party_a_positions_count: r.partyAPositionsCount,
            party_a_pending_quotes_count: r.partyAPendingQuotesCount,
            party_a_nonces: r.partyANonces,
            quote_ids_count: r.quoteIdsCount,
        }
    }
}

/// Locked collateral of a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LockedValuesView {
    #[serde(serialize_with = "decimal")]
    pub cva: U256,
    #[serde(serialize_with = "decimal")]
    pub lf: U256,
    #[serde(serialize_with = "decimal")]
    pub party_amm: U256,
    #[serde(serialize_with = "decimal")]
    pub party_bmm: U256,
}

impl LockedValuesView {
    fn from_abi(reader: &mut TupleReader<'_>) -> Result<Self, String> {
        Ok(Self {
            cva: reader.uint()?,
            lf: reader.uint()?,
            party_amm: reader.uint()?,
            party_bmm: reader.uint()?,
        })
    }
}

/// A quote, as returned by `getQuote`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteView {
    #[serde(serialize_with = "decimal")]
    pub id: U256,
    #[serde(serialize_with = "checksum_list")]
    pub party_bs_white_list: Vec<Address>,
    #[serde(serialize_with = "decimal")]
    pub symbol_id: U256,
    pub position_type: String,
    pub order_type: String,
    #[serde(serialize_with = "decimal")]
    pub opened_price: U256,
    #[serde(serialize_with = "decimal")]
    pub initial_opened_price: U256,
    #[serde(serialize_with = "decimal")]
    pub requested_open_price: U256,
    #[serde(serialize_with = "decimal")]
    pub market_price: U256,
    #[serde(serialize_with = "decimal")]
    pub quantity: U256,
    #[serde(serialize_with = "decimal")]
    pub closed_amount: U256,
    pub initial_locked_values: LockedValuesView,
    pub locked_values: LockedValuesView,
    #[serde(serialize_with = "decimal")]
    pub max_funding_rate: U256,
    #[serde(serialize_with = "checksum")]
    pub party_a: Address,
    #[serde(serialize_with = "checksum")]
    pub party_b: Address,
    pub quote_status: String,
    #[serde(serialize_with = "decimal")]
    pub avg_closed_price: U256,
    #[serde(serialize_with = "decimal")]
    pub requested_close_price: U256,
    #[serde(serialize_with = "decimal")]
    pub quantity_to_close: U256,
    #[serde(serialize_with = "decimal")]
    pub parent_id: U256,
    #[serde(serialize_with = "decimal")]
    pub create_timestamp: U256,
    #[serde(serialize_with = "decimal")]
    pub status_modify_timestamp: U256,
    #[serde(serialize_with = "decimal")]
    pub last_funding_payment_timestamp: U256,
    #[serde(serialize_with = "decimal")]
    pub deadline: U256,
    #[serde(serialize_with = "decimal")]
    pub trading_fee: U256,
    #[serde(serialize_with = "checksum")]
    pub affiliate: Address,
}

fn enum_name(names: &[&str], value: u8) -> String {
    names
        .get(value as usize)
        .map(|name| name.to_string())
        .unwrap_or_else(|| format!("UNKNOWN({})", value))
}

const POSITION_TYPES: &[&str] = &["LONG", "SHORT"];
const ORDER_TYPES: &[&str] = &["LIMIT", "MARKET"];
const QUOTE_STATUSES: &[&str] = &[
    "PENDING",
    "LOCKED",
    "CANCEL_PENDING",
    "CANCELED",
    "OPENED",
    "CLOSE_PENDING",
    "CANCEL_CLOSE_PENDING",
    "CLOSED",
    "LIQUIDATED",
    "EXPIRED",
    "LIQUIDATED_PENDING",
];

impl QuoteView {
    /// Build a view from the decoded `Quote` tuple, members in declared order.
    pub fn from_abi(value: &DynSolValue) -> Result<Self, String> {
        let mut q = TupleReader::new(value, "Quote", QUOTE_FIELDS)?;
        let quote = Self {
            id: q.uint()?,
            party_bs_white_list: q.addresses()?,
            symbol_id: q.uint()?,
            position_type: enum_name(POSITION_TYPES, q.small()?),
            order_type: enum_name(ORDER_TYPES, q.small()?),
            opened_price: q.uint()?,
            initial_opened_price: q.uint()?,
            requested_open_price: q.uint()?,
            market_price: q.uint()?,
            quantity: q.uint()?,
            closed_amount: q.uint()?,
            initial_locked_values: LockedValuesView::from_abi(&mut q.tuple(LOCKED_VALUES_FIELDS)?)?,
            locked_values: LockedValuesView::from_abi(&mut q.tuple(LOCKED_VALUES_FIELDS)?)?,
            max_funding_rate: q.uint()?,
            party_a: q.address()?,
            party_b: q.address()?,
            quote_status: enum_name(QUOTE_STATUSES, q.small()?),
            avg_closed_price: q.uint()?,
            requested_close_price: q.uint()?,
            quantity_to_close: q.uint()?,
            parent_id: q.uint()?,
            create_timestamp: q.uint()?,
            status_modify_timestamp: q.uint()?,
            last_funding_payment_timestamp: q.uint()?,
            deadline: q.uint()?,
            trading_fee: q.uint()?,
            affiliate: q.address()?,
        };
        Ok(quote)
    }
}

const LOCKED_VALUES_FIELDS: &[&str] = &["cva", "lf", "partyAmm", "partyBmm"];

const QUOTE_FIELDS: &[&str] = &[
    "id",
    "partyBsWhiteList",
    "symbolId",
    "positionType",
    "orderType",
    "openedPrice",
    "initialOpenedPrice",
    "requestedOpenPrice",
    "marketPrice",
    "quantity",
    "closedAmount",
    "initialLockedValues",
    "lockedValues",
    "maxFundingRate",
    "partyA",
    "partyB",
    "quoteStatus",
    "avgClosedPrice",
    "requestedClosePrice",
    "quantityToClose",
    "parentId",
    "createTimestamp",
    "statusModifyTimestamp",
    "lastFundingPaymentTimestamp",
    "deadline",
    "tradingFee",
    "affiliate",
];

/// Reads the members of a decoded struct one at a time, in order.
struct TupleReader<'a> {
    values: &'a [DynSolValue],
    names: &'static [&'static str],
    next: usize,
}

impl<'a> TupleReader<'a> {
    fn new(value: &'a DynSolValue, name: &str, names: &'static [&'static str]) -> Result<Self, String> {
        let values = value
            .as_tuple()
            .ok_or_else(|| format!("{} is not a tuple", name))?;
        if values.len() != names.len() {
            return Err(format!(
                "{} has {} members, expected {}",
                name,
                values.len(),
                names.len()
            ));
        }
        Ok(Self {
            values,
            names,
            next: 0,
        })
    }

    fn field(&mut self) -> Result<(&'a DynSolValue, &'static str), String> {
        let index = self.next;
        let value = self
            .values
            .get(index)
            .ok_or_else(|| "read past the last member".to_string())?;
        self.next += 1;
        Ok((value, self.names[index]))
    }

    fn uint(&mut self) -> Result<U256, String> {
        let (value, name) = self.field()?;
        value
            .as_uint()
            .map(|(v, _)| v)
            .ok_or_else(|| format!("{} is not an unsigned integer", name))
    }

    fn small(&mut self) -> Result<u8, String> {
        let (value, name) = self.field()?;
        value
            .as_uint()
            .and_then(|(v, _)| u8::try_from(v).ok())
            .ok_or_else(|| format!("{} is not a uint8", name))
    }

    fn address(&mut self) -> Result<Address, String> {
        let (value, name) = self.field()?;
        value
            .as_address()
            .ok_or_else(|| format!("{} is not an address", name))
    }

    fn addresses(&mut self) -> Result<Vec<Address>, String> {
        let (value, name) = self.field()?;
        value
            .as_array()
            .ok_or_else(|| format!("{} is not an array", name))?
            .iter()
            .map(|item| {
                item.as_address()
                    .ok_or_else(|| format!("{} contains a non-address", name))
            })
            .collect()
    }

    fn tuple(&mut self, names: &'static [&'static str]) -> Result<TupleReader<'a>, String> {
        let (value, name) = self.field()?;
        TupleReader::new(value, name, names)
    }
}

/// A sub-account owned by a user of the multi-account proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountEntry {
    #[serde(serialize_with = "checksum")]
    pub address: Address,
    pub name: String,
}

impl From<Account> for AccountEntry {
    fn from(a: Account) -> Self {
        Self {
            address: a.accountAddress,
            name: a.name,
        }
    }
}
