use std::io::ErrorKind;
use std::path::Path;

use common::cheese::image_file_name;
use common::{Cheese, CheeseId, InMemoryCheeseStore, Picture};
use tracing::{debug, info, warn};

use crate::config::CatalogueConfig;

/// Cheeses available on startup: (id, name, price per kilo, colour).
const DEFAULT_CHEESES: &[(CheeseId, &str, f64, &str)] = &[
    (1, "Cheddar", 15.0, "Yellow"),
    (2, "Brie", 18.0, "White"),
    (3, "Camembert", 20.0, "Cream"),
    (4, "St James", 80.0, "Yellow"),
];

pub fn default_cheeses() -> Vec<Cheese> {
    DEFAULT_CHEESES
        .iter()
        .map(|&(id, name, price, colour)| Cheese::new(id, name, price, colour))
        .collect()
}

/// Attach picture bytes from `images_dir` to each cheese that has an image
/// named by the usual convention (`St James` -> `st_james.jpg`).
///
/// Missing files leave the cheese without a picture; unreadable files are
/// logged and skipped.
pub async fn load_pictures(cheeses: Vec<Cheese>, images_dir: &Path) -> Vec<Cheese> {
    let mut loaded = Vec::with_capacity(cheeses.len());
    for cheese in cheeses {
        let path = images_dir.join(image_file_name(&cheese.name));
        match tokio::fs::read(&path).await {
            Ok(bytes) => loaded.push(cheese.with_picture(Picture::Bytes(bytes))),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No image for cheese");
                loaded.push(cheese);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read cheese image");
                loaded.push(cheese);
            }
        }
    }
    loaded
}

/// Build the store the server starts with.
pub async fn seed_store(config: &CatalogueConfig) -> InMemoryCheeseStore {
    if !config.seed {
        info!("Seeding disabled, starting with an empty catalogue");
        return InMemoryCheeseStore::new();
    }

    let mut cheeses = default_cheeses();
    if let Some(dir) = &config.images_dir {
        cheeses = load_pictures(cheeses, dir).await;
    }

    let pictures = cheeses.iter().filter(|c| c.picture.is_some()).count();
    info!("Seeded {} cheeses ({} with pictures)", cheeses.len(), pictures);

    InMemoryCheeseStore::with_cheeses(cheeses)
}
