//! Hypermedia links for the employee listing.
//!
//! Links are only produced when the client asks for the hateoas media type.
//! Each employee gets links for the operations available on it and the
//! collection gets a `self` link.

use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

use crate::dto::employee::EmployeeDto;
use crate::shaping::{ShapedEntity, shape_data};

/// Media type requesting hypermedia-enriched responses.
pub const HATEOAS_MEDIA_TYPE: &str = "application/vnd.companyemployees.hateoas+json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
    pub rel: String,
    pub method: String,
}

impl Link {
    fn new(href: impl Into<String>, rel: &str, method: &str) -> Self {
        Self {
            href: href.into(),
            rel: rel.to_string(),
            method: method.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkCollectionWrapper {
    pub value: Vec<Map<String, Value>>,
    pub links: Vec<Link>,
}

/// Body of the employee listing: plain shaped entities, or entities with
/// links wrapped together with the collection links.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LinkResponse {
    Shaped(Vec<Map<String, Value>>),
    Linked(LinkCollectionWrapper),
}

/// Generates links relative to one company's employee collection URL.
#[derive(Debug, Clone)]
pub struct EmployeeLinks {
    collection_url: Url,
}

impl EmployeeLinks {
    /// `collection_url` is the absolute URL of
    /// `/api/companies/{companyId}/employees`.
    pub fn new(mut collection_url: Url) -> Self {
        collection_url.set_query(None);
        if let Ok(mut segments) = collection_url.path_segments_mut() {
            segments.pop_if_empty();
        }
        Self { collection_url }
    }

    /// Shapes `employees` by `fields` and adds links when `with_links` is set.
    pub fn try_generate_links(
        &self,
        employees: &[EmployeeDto],
        fields: Option<&str>,
        with_links: bool,
    ) -> Result<LinkResponse, serde_json::Error> {
        let shaped = shape_data(employees, fields)?;

        if !with_links {
            return Ok(LinkResponse::Shaped(
                shaped.into_iter().map(|s| s.entity).collect(),
            ));
        }

        let mut value = Vec::with_capacity(shaped.len());
        for ShapedEntity { id, mut entity } in shaped {
            let links = self.entity_links(&id.to_string(), fields);
            entity.insert("links".to_string(), serde_json::to_value(links)?);
            value.push(entity);
        }

        Ok(LinkResponse::Linked(LinkCollectionWrapper {
            value,
            links: vec![Link::new(self.collection_url.as_str(), "self", "GET")],
        }))
    }

    fn entity_links(&self, id: &str, fields: Option<&str>) -> Vec<Link> {
        let mut entity_url = self.collection_url.clone();
        if let Ok(mut segments) = entity_url.path_segments_mut() {
            segments.push(id);
        }
        let href = entity_url.to_string();

        if let Some(fields) = fields {
            entity_url.query_pairs_mut().append_pair("fields", fields);
        }

        vec![
            Link::new(entity_url, "self", "GET"),
            Link::new(href.clone(), "delete_employee", "DELETE"),
            Link::new(href.clone(), "update_employee", "PUT"),
            Link::new(href, "partially_update_employee", "PATCH"),
        ]
    }
}

/// Whether any media type in an `Accept` header value asks for links.
pub fn accepts_hateoas<'a>(media_types: impl IntoIterator<Item = &'a str>) -> bool {
    media_types
        .into_iter()
        .any(|media_type| media_type.to_ascii_lowercase().contains("hateoas"))
}
