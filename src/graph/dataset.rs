// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Dataset references: the values that flow between translated nodes.
//!
//! A reference is encoded as `collection.namespace.kind.name`, e.g.
//! `nc_spm_08.PERMANENT.strds.lsat5_1987`. Text with fewer than three separators
//! decodes to a plain reference holding only a name; such a reference carries no
//! kind and no storage location, and callers that need either must fail with
//! [`TranslationError::UnresolvedReference`] instead of guessing.

use crate::errors::{TranslationError, TranslationResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const SEPARATOR: char = '.';

/// The three dataset kinds the backend stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    Raster,
    Vector,
    /// A space-time raster dataset series.
    Strds,
}

impl DatasetKind {
    pub fn token(&self) -> &'static str {
        match self {
            DatasetKind::Raster => "raster",
            DatasetKind::Vector => "vector",
            DatasetKind::Strds => "strds",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for DatasetKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raster" => Ok(DatasetKind::Raster),
            "vector" => Ok(DatasetKind::Vector),
            "strds" => Ok(DatasetKind::Strds),
            _ => Err(()),
        }
    }
}

/// An immutable handle on one geospatial dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatasetReference {
    name: String,
    kind: Option<DatasetKind>,
    namespace: Option<String>,
    collection: Option<String>,
    /// The stored dataset a derived reference was computed from.
    origin: Option<Box<DatasetReference>>,
}

impl DatasetReference {
    /// A fully qualified reference.
    pub fn new(
        collection: impl Into<String>,
        namespace: impl Into<String>,
        kind: DatasetKind,
        name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: Some(kind),
            namespace: Some(namespace.into()),
            collection: Some(collection.into()),
            origin: None,
        }
    }

    /// A reference to a dataset a translator is about to create.
    ///
    /// Created datasets live in the job's working namespace, so only the
    /// collection is carried over.
    pub fn derived(collection: Option<String>, kind: DatasetKind, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: Some(kind),
            namespace: None,
            collection,
            origin: None,
        }
    }

    /// A reference to a dataset a translator computes from `source`.
    ///
    /// The new dataset keeps the source's collection and remembers the stored
    /// dataset at the root of the derivation, see [`stored`](Self::stored).
    pub fn derived_from(source: &DatasetReference, kind: DatasetKind, name: impl Into<String>) -> Self {
        Self {
            origin: Some(Box::new(source.stored().clone())),
            ..Self::derived(source.collection.clone(), kind, name)
        }
    }

    /// Decode `collection.namespace.kind.name`.
    ///
    /// Fewer than three separators yield a plain reference whose name is the whole
    /// text. With three or more, an unknown kind token is a
    /// [`TranslationError::MalformedReference`]; dots after the third belong to the name.
    pub fn decode(text: &str) -> TranslationResult<Self> {
        let parts: Vec<&str> = text.splitn(4, SEPARATOR).collect();

        if parts.len() < 4 {
            return Ok(Self {
                name: text.to_string(),
                kind: None,
                namespace: None,
                collection: None,
                origin: None,
            });
        }

        let kind = parts[2]
            .parse::<DatasetKind>()
            .map_err(|_| TranslationError::MalformedReference {
                reference: text.to_string(),
                kind: parts[2].to_string(),
            })?;

        Ok(Self::new(parts[0], parts[1], kind, parts[3]))
    }

    /// Inverse of [`decode`](Self::decode) for fully qualified references; a plain
    /// reference encodes as its name.
    pub fn encode(&self) -> String {
        match (&self.collection, &self.namespace, self.kind) {
            (Some(collection), Some(namespace), Some(kind)) => {
                format!("{collection}.{namespace}.{kind}.{}", self.name)
            }
            _ => self.name.clone(),
        }
    }

    /// `name@namespace` when the namespace is known, otherwise `name`.
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(namespace) => format!("{}@{}", self.name, namespace),
            None => self.name.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Option<DatasetKind> {
        self.kind
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn collection(&self) -> Option<&str> {
        self.collection.as_deref()
    }

    /// The dataset that exists on the backend: the root of the derivation for a
    /// derived reference, the reference itself otherwise.
    pub fn stored(&self) -> &DatasetReference {
        self.origin.as_deref().unwrap_or(self)
    }

    pub fn is_fully_qualified(&self) -> bool {
        self.kind.is_some() && self.namespace.is_some() && self.collection.is_some()
    }

    /// The kind, or an error naming this reference when it was decoded from a plain name.
    pub fn require_kind(&self) -> TranslationResult<DatasetKind> {
        self.kind.ok_or_else(|| TranslationError::UnresolvedReference {
            reference: self.encode(),
        })
    }

    /// `(collection, namespace)`, or an error when either is unknown.
    pub fn require_location(&self) -> TranslationResult<(&str, &str)> {
        match (self.collection.as_deref(), self.namespace.as_deref()) {
            (Some(collection), Some(namespace)) => Ok((collection, namespace)),
            _ => Err(TranslationError::UnresolvedReference {
                reference: self.encode(),
            }),
        }
    }
}

impl fmt::Display for DatasetReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
