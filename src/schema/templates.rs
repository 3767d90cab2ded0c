//! Pre-built extraction schema templates.
//!
//! Each template is a ready-made JSON Schema for a common scraping shape so
//! callers do not have to hand-write one. Values match what the cloud service
//! documents for its extraction presets.

use serde_json::{json, Value};

/// The fixed set of named schema templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaTemplate {
    /// productName, price, description, inStock, images, specifications,
    /// rating, reviews
    Product,
    /// companyName, email, phone, address, website, socialMedia
    Contact,
    /// title, author, publishDate, content, summary, tags, readTime, category
    Article,
    /// companyName, industry, description, foundedYear, headquarters,
    /// employees, revenue, website, contactInfo, keyPeople
    Company,
}

impl SchemaTemplate {
    pub const ALL: [SchemaTemplate; 4] = [
        SchemaTemplate::Product,
        SchemaTemplate::Contact,
        SchemaTemplate::Article,
        SchemaTemplate::Company,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SchemaTemplate::Product => "product",
            SchemaTemplate::Contact => "contact",
            SchemaTemplate::Article => "article",
            SchemaTemplate::Company => "company",
        }
    }

    /// Resolve a template by name.
    ///
    /// Unrecognized names fall back to [`SchemaTemplate::Product`]. This is a
    /// deliberate permissive default, kept from the original service
    /// integration; the fallback is logged so it is observable.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "product" => SchemaTemplate::Product,
            "contact" => SchemaTemplate::Contact,
            "article" => SchemaTemplate::Article,
            "company" => SchemaTemplate::Company,
            other => {
                tracing::warn!(
                    template = other,
                    "unknown schema template name, falling back to product"
                );
                SchemaTemplate::Product
            }
        }
    }

    /// The canonical JSON Schema for this template.
    pub fn schema(&self) -> Value {
        match self {
            SchemaTemplate::Product => json!({
                "type": "object",
                "properties": {
                    "productName": { "type": "string" },
                    "price": { "type": "string" },
                    "description": { "type": "string" },
                    "inStock": { "type": "boolean" },
                    "images": {
                        "type": "array",
                        "items": { "type": "string" }
                    },
                    "specifications": { "type": "object" },
                    "rating": { "type": "number" },
                    "reviews": { "type": "number" }
                },
                "required": ["productName", "price"]
            }),
            SchemaTemplate::Contact => json!({
                "type": "object",
                "properties": {
                    "companyName": { "type": "string" },
                    "email": { "type": "string" },
                    "phone": { "type": "string" },
                    "address": { "type": "string" },
                    "website": { "type": "string" },
                    "socialMedia": {
                        "type": "object",
                        "properties": {
                            "twitter": { "type": "string" },
                            "linkedin": { "type": "string" },
                            "facebook": { "type": "string" }
                        }
                    }
                },
                "required": ["companyName"]
            }),
            SchemaTemplate::Article => json!({
                "type": "object",
                "properties": {
                    "title": { "type": "string" },
                    "author": { "type": "string" },
                    "publishDate": { "type": "string" },
                    "content": { "type": "string" },
                    "summary": { "type": "string" },
                    "tags": {
                        "type": "array",
                        "items": { "type": "string" }
                    },
                    "readTime": { "type": "string" },
                    "category": { "type": "string" }
                },
                "required": ["title", "content"]
            }),
            SchemaTemplate::Company => json!({
                "type": "object",
                "properties": {
                    "companyName": { "type": "string" },
                    "industry": { "type": "string" },
                    "description": { "type": "string" },
                    "foundedYear": { "type": "string" },
                    "headquarters": { "type": "string" },
                    "employees": { "type": "string" },
                    "revenue": { "type": "string" },
                    "website": { "type": "string" },
                    "contactInfo": {
                        "type": "object",
                        "properties": {
                            "email": { "type": "string" },
                            "phone": { "type": "string" },
                            "address": { "type": "string" }
                        }
                    },
                    "keyPeople": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "name": { "type": "string" },
                                "position": { "type": "string" }
                            }
                        }
                    }
                },
                "required": ["companyName", "description"]
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for template in SchemaTemplate::ALL {
            assert_eq!(SchemaTemplate::from_name(template.name()), template);
        }
    }

    #[test]
    fn unknown_name_falls_back_to_product() {
        assert_eq!(
            SchemaTemplate::from_name("recipe"),
            SchemaTemplate::Product
        );
        assert_eq!(SchemaTemplate::from_name(""), SchemaTemplate::Product);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(
            SchemaTemplate::from_name(" Article "),
            SchemaTemplate::Article
        );
    }
}
