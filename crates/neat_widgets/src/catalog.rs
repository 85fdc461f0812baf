//! Artwork catalog
//!
//! An ordered, read-only list of artwork records. The built-in catalog ships
//! four paintings; a TOML file with `[[artwork]]` tables can replace it.
//!
//! ```toml
//! [[artwork]]
//! title = "The House Within"
//! creator_name = "Rabindranath Tagore"
//! image_url = "https://example.com/house.jpg"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

/// One artwork record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    pub title: String,
    pub creator_name: String,
    pub image_url: String,
    /// Empty when the creator has no portrait
    #[serde(default)]
    pub creator_image_url: String,
}

impl Artwork {
    pub fn new(
        title: impl Into<String>,
        creator_name: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            creator_name: creator_name.into(),
            image_url: image_url.into(),
            creator_image_url: String::new(),
        }
    }

    pub fn has_image(&self) -> bool {
        !self.image_url.is_empty()
    }

    pub fn has_creator_image(&self) -> bool {
        !self.creator_image_url.is_empty()
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    artwork: Vec<Artwork>,
}

/// Ordered list of artworks
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    artworks: Vec<Artwork>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// Build a catalog, rejecting empty lists and records without a title or creator
    pub fn new(artworks: Vec<Artwork>) -> Result<Self> {
        if artworks.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (index, artwork) in artworks.iter().enumerate() {
            if artwork.title.trim().is_empty() {
                return Err(CatalogError::MissingField {
                    index,
                    field: "title",
                });
            }
            if artwork.creator_name.trim().is_empty() {
                return Err(CatalogError::MissingField {
                    index,
                    field: "creator_name",
                });
            }
        }
        Ok(Self { artworks })
    }

    pub fn builtin() -> Self {
        Self {
            artworks: vec![
                Artwork::new(
                    "The House Within",
                    "Rabindranath Tagore",
                    "https://arnavshome.vercel.app/images/artwork/artwork-one.jpg",
                ),
                Artwork::new(
                    "Goddess Saraswati",
                    "Raja Ravi Varma",
                    "https://arnavshome.vercel.app/images/artwork/artwork-two.jpg",
                ),
                Artwork::new(
                    "Lady Playing the Veena",
                    "Raja Ravi Varma",
                    "https://www.artzolo.com/cdn/shop/articles/kadambari-artzolo-com.webp?v=1769332392&width=550",
                ),
                Artwork::new(
                    "Pratima Visarjan",
                    "Gaganedranath Tagore",
                    "https://arnavshome.vercel.app/images/artwork/artwork-five.jpg",
                ),
            ],
        }
    }

    /// Parse a catalog from TOML text
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(src)?;
        Self::new(file.artwork)
    }

    /// Load a catalog from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_toml_str(&src)?;
        tracing::debug!(path = %path.display(), count = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn get(&self, index: usize) -> Option<&Artwork> {
        self.artworks.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Artwork> {
        self.artworks.iter()
    }

    pub fn len(&self) -> usize {
        self.artworks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artworks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.get(0).unwrap().title, "The House Within");
        assert_eq!(catalog.get(3).unwrap().creator_name, "Gaganedranath Tagore");
        assert!(catalog.iter().all(|a| a.has_image() && !a.has_creator_image()));
    }

    #[test]
    fn test_parse_toml() {
        let catalog = Catalog::from_toml_str(
            r#"
            [[artwork]]
            title = "Shiva"
            creator_name = "Nandalal Bose"
            image_url = ""
            creator_image_url = "https://example.com/bose.jpg"
            "#,
        )
        .unwrap();

        let artwork = catalog.get(0).unwrap();
        assert!(!artwork.has_image());
        assert!(artwork.has_creator_image());
    }

    #[test]
    fn test_rejects_empty_and_incomplete() {
        assert!(matches!(
            Catalog::from_toml_str(""),
            Err(CatalogError::Empty)
        ));
        assert!(matches!(
            Catalog::from_toml_str(
                "[[artwork]]\ntitle = \" \"\ncreator_name = \"x\"\nimage_url = \"\"\n"
            ),
            Err(CatalogError::MissingField { index: 0, field: "title" })
        ));
        assert!(matches!(
            Catalog::from_toml_str("[[artwork]]\ntitle = 3\n"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Catalog::load("/nonexistent/neat-catalog.toml").unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
