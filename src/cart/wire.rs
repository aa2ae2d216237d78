//! JSON form of cart actions: `{ "type": "ADD_ITEM", "payload": { .. } }`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::action::CartAction;
use crate::cart::ids::ItemId;
use crate::cart::price::Price;
use crate::cart::state::CartItem;

/// Errors decoding a wire action of a known type.
///
/// An unknown `type` is not an error; it decodes to
/// [`CartAction::Unrecognized`].
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Action is not valid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("{action} requires a payload")]
    MissingPayload { action: &'static str },

    #[error("Malformed {action} payload: {source}")]
    MalformedPayload {
        action: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireAction {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

/// `REMOVE_ITEM` only needs the id; the rest of the item is optional.
#[derive(Deserialize)]
struct RemovePayload {
    id: ItemId,
    #[serde(default)]
    item: String,
    #[serde(default)]
    price: Price,
}

impl WireAction {
    pub fn parse(text: &str) -> Result<Self, ActionError> {
        serde_json::from_str(text).map_err(|source| ActionError::InvalidJson { source })
    }

    pub fn decode(self) -> Result<CartAction, ActionError> {
        let WireAction { kind, payload } = self;
        match kind.as_str() {
            CartAction::ADD_ITEM => {
                let item: CartItem = payload_as(CartAction::ADD_ITEM, payload)?;
                Ok(CartAction::AddItem(item))
            }
            CartAction::REMOVE_ITEM => {
                let RemovePayload { id, item, price } =
                    payload_as(CartAction::REMOVE_ITEM, payload)?;
                Ok(CartAction::RemoveItem(CartItem { id, item, price }))
            }
            _ => Ok(CartAction::Unrecognized(kind.clone())),
        }
    }
}

impl From<&CartAction> for WireAction {
    fn from(action: &CartAction) -> Self {
        match action {
            CartAction::AddItem(item) => Self {
                kind: CartAction::ADD_ITEM.to_string(),
                payload: serde_json::to_value(item).ok(),
            },
            CartAction::RemoveItem(item) => Self {
                kind: CartAction::REMOVE_ITEM.to_string(),
                payload: serde_json::to_value(item).ok(),
            },
            CartAction::Unrecognized(kind) => Self {
                kind: kind.clone(),
                payload: None,
            },
        }
    }
}

fn payload_as<T>(action: &'static str, payload: Option<serde_json::Value>) -> Result<T, ActionError>
where
    T: for<'de> Deserialize<'de>,
{
    let payload = payload.ok_or(ActionError::MissingPayload { action })?;
    serde_json::from_value(payload).map_err(|source| ActionError::MalformedPayload { action, source })
}
