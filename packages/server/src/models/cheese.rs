use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use common::{Cheese, CheeseId, Picture};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheeseRequest {
    #[schema(example = 6)]
    pub id: CheeseId,
    #[schema(example = "St James")]
    pub name: String,
    #[schema(example = 80.0)]
    pub price_per_kilo: f64,
    #[schema(example = "Yellow")]
    pub colour: String,
    /// Base64 image content, or a reference such as `/images/st_james.jpg`
    /// or `https://cdn.example/st_james.jpg`.
    #[serde(default)]
    pub picture: Option<String>,
}

/// Full replacement of a cheese. The id comes from the path; any `id` in the
/// body is ignored. Omitted optional fields are cleared, not merged.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCheeseRequest {
    #[schema(example = "Updated St James")]
    pub name: String,
    #[schema(example = 55.0)]
    pub price_per_kilo: f64,
    #[serde(default)]
    #[schema(example = "Yellow")]
    pub colour: String,
    #[serde(default)]
    pub picture: Option<String>,
}

/// A cheese as served to clients. `picture` is the public image path, or
/// `null` when the cheese has no picture.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheeseResponse {
    #[schema(example = 1)]
    pub id: CheeseId,
    #[schema(example = "Cheddar")]
    pub name: String,
    #[schema(example = 15.0)]
    pub price_per_kilo: f64,
    #[schema(example = "Yellow")]
    pub colour: String,
    #[schema(example = "/images/cheddar.jpg")]
    pub picture: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceResponse {
    #[schema(example = 1)]
    pub cheese_id: CheeseId,
    #[schema(example = 15.0)]
    pub price: f64,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CostResponse {
    #[schema(example = 1)]
    pub cheese_id: CheeseId,
    #[schema(example = 2.0)]
    pub weight: f64,
    #[schema(example = 30.0)]
    pub total_cost: f64,
}

impl From<Cheese> for CheeseResponse {
    fn from(c: Cheese) -> Self {
        let picture = c.picture_path();
        Self {
            id: c.id,
            name: c.name,
            price_per_kilo: c.price_per_kilo,
            colour: c.colour,
            picture,
        }
    }
}

impl CreateCheeseRequest {
    pub fn into_cheese(self) -> Result<Cheese, AppError> {
        Ok(Cheese {
            id: self.id,
            name: self.name,
            price_per_kilo: self.price_per_kilo,
            colour: self.colour,
            picture: self.picture.map(decode_picture).transpose()?.flatten(),
        })
    }
}

impl UpdateCheeseRequest {
    pub fn into_cheese(self, id: CheeseId) -> Result<Cheese, AppError> {
        Ok(Cheese {
            id,
            name: self.name,
            price_per_kilo: self.price_per_kilo,
            colour: self.colour,
            picture: self.picture.map(decode_picture).transpose()?.flatten(),
        })
    }
}

/// Interpret a client-supplied picture string.
///
/// Paths (`/images/brie.jpg`) and URLs (`https://...`) are kept as references.
/// Anything else must be standard base64 and is stored as bytes. An empty
/// string means no picture.
pub fn decode_picture(raw: String) -> Result<Option<Picture>, AppError> {
    if raw.is_empty() {
        return Ok(None);
    }
    if raw.starts_with('/') || raw.contains("://") {
        return Ok(Some(Picture::Reference(raw)));
    }
    STANDARD
        .decode(raw.as_bytes())
        .map(|bytes| Some(Picture::Bytes(bytes)))
        .map_err(|_| {
            AppError::Validation("Picture must be base64 image data or an image path".into())
        })
}

fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("Name must not be empty".into()));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), AppError> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::Validation(
            "Price per kilo must be a non-negative number".into(),
        ));
    }
    Ok(())
}

pub fn validate_create_cheese(req: &CreateCheeseRequest) -> Result<(), AppError> {
    validate_name(&req.name)?;
    validate_price(req.price_per_kilo)
}

pub fn validate_update_cheese(req: &UpdateCheeseRequest) -> Result<(), AppError> {
    validate_name(&req.name)?;
    validate_price(req.price_per_kilo)
}
