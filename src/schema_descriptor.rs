//! Static description of the property database handed to the translator.
//!
//! The translator never introspects the live database; it works from this
//! fixed text block plus the instruction prompt below.

/// Tables and columns the generated SQL may reference.
pub const DB_STRUCTURE: &str = "\
Tables:
- Properties (property_id, unparsed_address, list_price, bedrooms, bathrooms, square_footage, property_type, year_built, description, latitude, longitude)
- Amenities (amenity_id, property_id, amenity_type, title, address, distance_km)
";

/// Fixed instruction prompt for the completion service.
pub const TRANSLATION_PROMPT: &str = "\
You are an expert in converting natural language questions to SQL queries and don't make mistakes in SQL queries.
Given the database structure below, generate a SQL query for the user's question.
- Always display the Properties using P.* (which includes unparsed_address)
- Always ensure unparsed_address is included in the SELECT clause
- For properties with a pool, check the 'description' field for the word 'pool'.
- For amenities, only use the following key words values for 'amenity_type': Transit, Malls, Pharmacies, Hospitals, Schools, Restaurants, Groceries, ATMs, Parks.
- Use DISTINCT to avoid duplicate rows.
- Use LIKE for case-insensitive searches, not ILIKE.
- Use <= for less than or equal to comparisons.
- Use the correct spelling for locations (e.g., 'South Carolina').
Only return the SQL query, nothing else.
";

/// Schema context for query translation.
#[derive(Debug, Clone)]
pub struct SchemaDescriptor {
    structure: &'static str,
    prompt: &'static str,
}

impl Default for SchemaDescriptor {
    fn default() -> Self {
        Self {
            structure: DB_STRUCTURE,
            prompt: TRANSLATION_PROMPT,
        }
    }
}

impl SchemaDescriptor {
    pub fn structure(&self) -> &str {
        self.structure
    }

    pub fn prompt(&self) -> &str {
        self.prompt
    }
}
