//! Result types for each pipeline stage.
//!
//! Every stage parses the model's JSON into one of these structs. The final
//! answer is an explicit [`FinalResult`] assembled by field assignment, so
//! no key can be silently lost or overwritten; `#[serde(flatten)]` keeps the
//! wire shape a flat union of the four stage objects.

use serde::{Deserialize, Serialize};

/// Output of the extractor stage: the image's text and a visual summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// All text transcribed from the image
    pub raw_text: String,

    /// Description of what the image shows (product, scene, branding)
    pub visual_description: String,
}

/// Output of the date expert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateResult {
    /// Closing date in YYYY-MM-DD, if one was announced
    pub date: Option<String>,

    /// Closing time in HH:MM, if one was announced
    pub ends_at_time: Option<String>,

    /// Whether the giveaway closes at a specific time of day
    #[serde(default)]
    pub is_priority_time: bool,
}

/// Output of the prize expert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrizeResult {
    /// Short description of the prize
    pub prize: String,

    /// One of the fixed category keys
    pub prize_category: PrizeCategory,

    /// Expert's confidence in the categorization (0.0 to 1.0)
    pub confidence_score: f32,
}

/// Fixed prize category keys the prize expert chooses from.
///
/// `Other` also absorbs any unknown key the model invents, so a creative
/// model answer degrades to the catch-all instead of failing the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrizeCategory {
    Smartphone,
    Tablet,
    Laptop,
    Console,
    Videogame,
    Headphones,
    Smartwatch,
    Camera,
    Drone,
    Television,
    HomeAppliance,
    KitchenAppliance,
    Furniture,
    HomeDecor,
    Bedding,
    Clothing,
    Footwear,
    Accessories,
    Jewelry,
    Watch,
    Handbag,
    Sunglasses,
    Makeup,
    Skincare,
    Perfume,
    Haircare,
    FoodHamper,
    Beverage,
    RestaurantVoucher,
    SupermarketBasket,
    Travel,
    HotelStay,
    Experience,
    EventTickets,
    ConcertTickets,
    SportsEquipment,
    Fitness,
    Bicycle,
    Toys,
    Books,
    PetSupplies,
    BabyProducts,
    GiftCard,
    Cash,
    #[serde(other)]
    Other,
}

/// Output of the accounts expert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountsResult {
    /// Organizing accounts, each prefixed with "@"
    pub accounts: Vec<String>,
}

/// Output of the appraisal stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceResult {
    /// Estimated value as "<amount>€", if one could be determined
    pub price: Option<String>,

    /// How many winners share the prize
    pub winner_count: u32,

    /// How the value was determined
    pub appraisal_notes: String,

    /// Source URL backing the estimate, if the appraiser found one
    pub url: Option<String>,
}

impl PriceResult {
    /// Default result when no value could be determined.
    pub fn no_value() -> Self {
        Self {
            price: None,
            winner_count: 1,
            appraisal_notes: "No se encontró valor explícito.".to_string(),
            url: None,
        }
    }

    /// Result for an amount matched directly in the raw text, skipping the
    /// appraiser call.
    pub fn direct(price: impl Into<String>) -> Self {
        Self {
            price: Some(price.into()),
            winner_count: 1,
            appraisal_notes: "Valor extraído directamente del texto.".to_string(),
            url: None,
        }
    }
}

/// The complete analysis returned to the caller: the union of all four
/// stage results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalResult {
    #[serde(flatten)]
    pub date: DateResult,

    #[serde(flatten)]
    pub prize: PrizeResult,

    #[serde(flatten)]
    pub accounts: AccountsResult,

    #[serde(flatten)]
    pub price: PriceResult,
}
