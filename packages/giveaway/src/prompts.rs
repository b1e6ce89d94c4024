//! LLM prompts for the giveaway analysis pipeline.
//!
//! Five templates: the extractor, the three experts (date, prize, accounts)
//! and the price appraiser. Templates carry `${placeholder}` tokens that are
//! substituted through [`render_template`], which rejects both unknown
//! variables and tokens that survive substitution.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// Prompt for the extractor stage (runs against the image).
pub const EXTRACTOR_PROMPT: &str = r#"Eres un transcriptor experto de imágenes de sorteos en redes sociales.

Analiza la imagen adjunta y devuelve:
1. TODO el texto visible, transcrito literalmente (incluye emojis, menciones @, hashtags y precios).
2. Una descripción visual del contenido: qué producto se muestra, marcas visibles, ambientación.

Responde SOLO con JSON:
{
    "raw_text": "texto completo transcrito de la imagen",
    "visual_description": "descripción de lo que se ve en la imagen"
}

Si la imagen no contiene texto legible o no parece un sorteo, responde:
{
    "error": "motivo por el que no se pudo extraer"
}"#;

/// Prompt for the date expert.
pub const DATE_EXPERT_PROMPT: &str = r#"Eres un experto en fechas de cierre de sorteos.

Hoy es ${current_date}. Con esa referencia, resuelve fechas relativas
("este viernes", "en 48 horas") y años omitidos: si el texto menciona un día
y mes sin año, asume la próxima ocurrencia futura.

Identifica en el texto:
1. La fecha de finalización del sorteo.
2. La hora de cierre, si se indica.

Responde SOLO con JSON:
{
    "date": "YYYY-MM-DD o null si no hay fecha",
    "ends_at_time": "HH:MM o null si no hay hora",
    "is_priority_time": true si el sorteo cierra a una hora concreta, false en caso contrario
}"#;

/// Prompt for the prize expert.
pub const PRIZE_EXPERT_PROMPT: &str = r#"Eres un experto en identificar premios de sorteos.

A partir del texto y la descripción visual, determina:
1. El premio concreto (modelo y marca si aparecen).
2. Su categoría, eligiendo EXACTAMENTE una de estas claves:
smartphone, tablet, laptop, console, videogame, headphones, smartwatch,
camera, drone, television, home_appliance, kitchen_appliance, furniture,
home_decor, bedding, clothing, footwear, accessories, jewelry, watch,
handbag, sunglasses, makeup, skincare, perfume, haircare, food_hamper,
beverage, restaurant_voucher, supermarket_basket, travel, hotel_stay,
experience, event_tickets, concert_tickets, sports_equipment, fitness,
bicycle, toys, books, pet_supplies, baby_products, gift_card, cash, other

Responde SOLO con JSON:
{
    "prize": "descripción breve del premio",
    "prize_category": "una clave de la lista",
    "confidence_score": 0.0 a 1.0
}"#;

/// Prompt for the accounts expert.
pub const ACCOUNTS_EXPERT_PROMPT: &str = r#"Eres un experto en identificar las cuentas que organizan un sorteo.

Extrae del texto todas las cuentas organizadoras (las que publican el sorteo
o hay que seguir para participar). Normaliza cada una con el prefijo "@".
No incluyas cuentas solo mencionadas como ejemplo de participación.

Responde SOLO con JSON:
{
    "accounts": ["@cuenta1", "@cuenta2"]
}"#;

/// Prompt for the price appraiser.
pub const PRICE_APPRAISER_PROMPT: &str = r#"Eres un tasador de premios de sorteos en el mercado español.

Premio a tasar: ${prize_name}
Cuentas organizadoras: ${accounts_list}

Estima el valor de mercado del premio en euros. Si el premio se reparte
entre varios ganadores, indícalo en winner_count. Si conoces una página de
producto que respalde la estimación, inclúyela en url.

Responde SOLO con JSON:
{
    "price": "valor estimado con formato <cantidad>€, o null si es imposible estimar",
    "winner_count": número de ganadores (1 si no se indica),
    "appraisal_notes": "justificación breve de la estimación",
    "url": "enlace de referencia o null"
}"#;

/// Errors from prompt template rendering.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    /// A supplied variable has no `${name}` token in the template
    #[error("placeholder not found in template: {name}")]
    UnknownPlaceholder { name: String },

    /// A `${...}` token survived substitution
    #[error("unrendered placeholder left in template: {token}")]
    Unrendered { token: String },
}

/// Substitute `${name}` tokens in a template.
///
/// Every supplied variable must have a matching token, and no token may
/// remain afterwards. Values are inserted verbatim; a value containing a
/// `${` sequence would itself trip the residual check, which turns the
/// template-corruption risk of naive substitution into a hard error.
pub fn render_template(
    template: &str,
    vars: &[(&str, &str)],
) -> Result<String, TemplateError> {
    let mut rendered = template.to_string();
    for (name, value) in vars {
        let token = format!("${{{name}}}");
        if !rendered.contains(&token) {
            return Err(TemplateError::UnknownPlaceholder {
                name: (*name).to_string(),
            });
        }
        rendered = rendered.replace(&token, value);
    }
    if let Some(start) = rendered.find("${") {
        let token = rendered[start..]
            .split_inclusive('}')
            .next()
            .unwrap_or("${")
            .to_string();
        return Err(TemplateError::Unrendered { token });
    }
    Ok(rendered)
}

/// Format the date-expert prompt with today's date and the extracted text.
pub fn format_date_prompt(
    current_date: &str,
    raw_text: &str,
) -> Result<String, TemplateError> {
    let header = render_template(DATE_EXPERT_PROMPT, &[("current_date", current_date)])?;
    Ok(format!("{header}\n\n# TEXTO A ANALIZAR:\n{raw_text}"))
}

/// Format the prize-expert prompt with the extracted text and visual summary.
pub fn format_prize_prompt(raw_text: &str, visual_description: &str) -> String {
    format!(
        "{PRIZE_EXPERT_PROMPT}\n\n# TEXTO A ANALIZAR:\n{raw_text}\n\n# DESCRIPCIÓN VISUAL A CONSIDERAR:\n{visual_description}"
    )
}

/// Format the accounts-expert prompt with the extracted text.
pub fn format_accounts_prompt(raw_text: &str) -> String {
    format!("{ACCOUNTS_EXPERT_PROMPT}\n\n# TEXTO A ANALIZAR:\n{raw_text}")
}

/// Format the appraiser prompt with the prize name and account list.
pub fn format_appraiser_prompt(
    prize_name: &str,
    accounts: &[String],
) -> Result<String, TemplateError> {
    render_template(
        PRICE_APPRAISER_PROMPT,
        &[
            ("prize_name", prize_name),
            ("accounts_list", &accounts.join(", ")),
        ],
    )
}

const SPANISH_MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Format a date the long Spanish way, e.g. "25 de diciembre de 2024".
pub fn long_spanish_date(date: NaiveDate) -> String {
    format!(
        "{} de {} de {}",
        date.day(),
        SPANISH_MONTHS[date.month0() as usize],
        date.year()
    )
}
