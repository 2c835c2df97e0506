/// Identifier of a cheese record, assigned by whoever creates it.
pub type CheeseId = i64;

/// Stored picture of a cheese.
///
/// Pictures are immutable once stored. The transport form never exposes the
/// raw bytes; see [`image_path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Picture {
    /// Raw image content, usually JPEG.
    Bytes(Vec<u8>),
    /// An already-resolved reference such as `/images/brie.jpg`.
    Reference(String),
}

/// A cheese record as held by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Cheese {
    pub id: CheeseId,
    pub name: String,
    pub price_per_kilo: f64,
    pub colour: String,
    pub picture: Option<Picture>,
}

impl Cheese {
    pub fn new(
        id: CheeseId,
        name: impl Into<String>,
        price_per_kilo: f64,
        colour: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price_per_kilo,
            colour: colour.into(),
            picture: None,
        }
    }

    pub fn with_picture(mut self, picture: Picture) -> Self {
        self.picture = Some(picture);
        self
    }

    /// Public image path for this cheese, or `None` when it has no picture.
    pub fn picture_path(&self) -> Option<String> {
        self.picture.as_ref().map(|_| image_path(&self.name))
    }
}

/// File name an image for `name` is stored under, e.g. `st_james.jpg`.
///
/// Only the first space is replaced: `"Pont l Eveque"` becomes
/// `pont_l eveque.jpg`. Clients depend on this exact rendering.
pub fn image_file_name(name: &str) -> String {
    format!("{}.jpg", name.to_lowercase().replacen(' ', "_", 1))
}

/// Public path of the image for `name`, e.g. `/images/st_james.jpg`.
pub fn image_path(name: &str) -> String {
    format!("/images/{}", image_file_name(name))
}
