//! Column descriptors and rendered cells.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// Semantic colour of a cell; front-ends map it onto their palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Default,
    Positive,
    Negative,
    Warning,
    Muted,
    Accent,
}

/// Display output for one cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rendered {
    pub text: String,
    pub tone: Tone,
}

impl Rendered {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Default,
        }
    }

    pub fn toned(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

impl From<String> for Rendered {
    fn from(text: String) -> Self {
        Rendered::new(text)
    }
}

impl From<&str> for Rendered {
    fn from(text: &str) -> Self {
        Rendered::new(text)
    }
}

type RenderFn<T> = Arc<dyn Fn(&T) -> Rendered + Send + Sync>;

/// One displayed attribute of `T`.
pub struct Column<T> {
    key: String,
    header: String,
    sortable: bool,
    width: Option<u16>,
    render: Option<RenderFn<T>>,
}

impl<T> Column<T> {
    /// A non-sortable column rendered from `field(key)`.
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            sortable: false,
            width: None,
            render: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Display width hint in terminal cells.
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn width_hint(&self) -> Option<u16> {
        self.width
    }
}

impl<T: 'static> Column<T> {
    pub fn render<F, R>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> R + Send + Sync + 'static,
        R: Into<Rendered>,
    {
        self.render = Some(Arc::new(move |record: &T| f(record).into()));
        self
    }
}

impl<T: Record> Column<T> {
    /// Custom renderer if present, otherwise the stringified field, or `""`.
    pub fn cell(&self, record: &T) -> Rendered {
        match &self.render {
            Some(render) => render(record),
            None => Rendered::new(
                record
                    .field(&self.key)
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
            ),
        }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            header: self.header.clone(),
            sortable: self.sortable,
            width: self.width,
            render: self.render.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("width", &self.width)
            .field("render", &self.render.is_some())
            .finish()
    }
}
