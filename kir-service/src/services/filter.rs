use mongodb::bson::{doc, Bson, Document};

/// Query filter accepted by [`DocumentStore::find_many`](super::DocumentStore::find_many).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DocumentFilter {
    #[default]
    All,
    /// Any of `fields` contains `needle`, ignoring case.
    ContainsAny { fields: Vec<String>, needle: String },
}

impl DocumentFilter {
    /// Builds a substring filter from an optional search term. A missing or
    /// empty term matches everything.
    pub fn search(fields: &[&str], term: Option<&str>) -> Self {
        match term {
            Some(needle) if !needle.is_empty() => DocumentFilter::ContainsAny {
                fields: fields.iter().map(|f| f.to_string()).collect(),
                needle: needle.to_string(),
            },
            _ => DocumentFilter::All,
        }
    }

    /// MongoDB rendering: an `$or` of escaped, case-insensitive `$regex` clauses.
    pub fn to_bson(&self) -> Document {
        match self {
            DocumentFilter::All => doc! {},
            DocumentFilter::ContainsAny { fields, needle } => {
                let pattern = regex::escape(needle);
                let clauses: Vec<Bson> = fields
                    .iter()
                    .map(|field| {
                        let mut clause = Document::new();
                        clause.insert(field.as_str(), doc! { "$regex": pattern.as_str(), "$options": "i" });
                        Bson::Document(clause)
                    })
                    .collect();
                doc! { "$or": clauses }
            }
        }
    }

    /// In-process evaluation with the same semantics as [`Self::to_bson`].
    /// Non-string field values never match.
    pub fn matches(&self, document: &Document) -> bool {
        match self {
            DocumentFilter::All => true,
            DocumentFilter::ContainsAny { fields, needle } => {
                let needle = needle.to_lowercase();
                fields.iter().any(|field| {
                    document
                        .get_str(field)
                        .map(|value| value.to_lowercase().contains(&needle))
                        .unwrap_or(false)
                })
            }
        }
    }
}
