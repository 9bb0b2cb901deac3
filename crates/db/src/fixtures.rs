//! Deterministic demo fixtures.
//!
//! The seed set mirrors a realistic slice of the laptop catalog: a budget
//! trap, midrange volume models, gaming machines, Apple silicon, and the
//! high-margin house brand. Listings are pushed through the same
//! normalization path a live sync uses, so seeding also exercises extraction
//! and margin classification end to end.

use upsalg_core::domain::listing::RawListing;
use upsalg_core::margin::MarginEndings;
use upsalg_core::recommend::build_product;

use crate::repositories::{ProductRepository, RepositoryError};

struct SeedListing {
    title: &'static str,
    manufacturer: &'static str,
    price: f64,
    previous_price: Option<f64>,
    ean: &'static str,
}

const SEED_LISTINGS: &[SeedListing] = &[
    SeedListing {
        title: "Acer Aspire 3 (i3/8/256 GB) 15.6\" bærbar computer",
        manufacturer: "Acer",
        price: 3499.0,
        previous_price: None,
        ean: "4711121000001",
    },
    SeedListing {
        title: "ASUS Vivobook 15 (i5/16/512 GB) 15.6\" bærbar computer",
        manufacturer: "Asus",
        price: 4498.0,
        previous_price: Some(4999.0),
        ean: "4711121000002",
    },
    SeedListing {
        title: "Lenovo IdeaPad Slim 5 (Ryzen 5/16/512 GB) 14\" bærbar",
        manufacturer: "Lenovo",
        price: 4799.0,
        previous_price: None,
        ean: "4711121000003",
    },
    SeedListing {
        title: "HP Pavilion 15 (i5/16/1 TB) 15.6\" bærbar computer",
        manufacturer: "HP",
        price: 5498.0,
        previous_price: Some(5998.0),
        ean: "4711121000004",
    },
    SeedListing {
        title: "Cepter Nordlys 15 (i5/16/512 GB) 15.6\" bærbar computer",
        manufacturer: "Cepter",
        price: 4995.0,
        previous_price: None,
        ean: "4711121000005",
    },
    SeedListing {
        title: "Lenovo LOQ 15 gaming med Intel Core i7-13650HX, 16 GB RAM og GeForce RTX 4060",
        manufacturer: "Lenovo",
        price: 8498.0,
        previous_price: Some(9499.0),
        ean: "4711121000006",
    },
    SeedListing {
        title: "ASUS TUF Gaming A15 med AMD Ryzen 7 7735HS, 16 GB DDR5 og GeForce RTX 4050",
        manufacturer: "Asus",
        price: 7998.0,
        previous_price: None,
        ean: "4711121000007",
    },
    SeedListing {
        title: "Apple MacBook Air 13\" M2 8 GB RAM 256 GB SSD",
        manufacturer: "Apple",
        price: 7499.0,
        previous_price: None,
        ean: "4711121000008",
    },
    SeedListing {
        title: "Acer Chromebook 314 med Intel Celeron N4500 og 14\" skærm",
        manufacturer: "Acer",
        price: 1998.0,
        previous_price: None,
        ean: "4711121000009",
    },
    SeedListing {
        title: "Samsung Galaxy Book4 (Core 7/16/512 GB) 15.6\" bærbar computer",
        manufacturer: "Samsung",
        price: 6498.0,
        previous_price: Some(6999.0),
        ean: "4711121000010",
    },
];

/// The raw listings behind the seed set.
pub fn seed_listings() -> Vec<RawListing> {
    SEED_LISTINGS
        .iter()
        .map(|seed| RawListing {
            title: seed.title.to_owned(),
            manufacturer: Some(seed.manufacturer.to_owned()),
            price: Some(seed.price),
            previous_price: seed.previous_price,
            image: None,
            url: Some(format!("https://example.dk/p/{}", seed.ean)),
            ean: Some(seed.ean.to_owned()),
            in_stock: Some(true),
            description: None,
        })
        .collect()
}

/// Normalize and upsert the seed set. Returns the number of records written.
pub async fn seed(
    repository: &dyn ProductRepository,
    endings: MarginEndings,
) -> Result<u64, RepositoryError> {
    let products: Vec<_> =
        seed_listings().into_iter().filter_map(|listing| build_product(listing, endings)).collect();
    repository.upsert(&products).await
}

#[cfg(test)]
mod tests {
    use upsalg_core::margin::MarginEndings;

    use super::{seed, seed_listings};
    use crate::repositories::{InMemoryProductRepository, ProductRepository};

    #[tokio::test]
    async fn seeding_is_idempotent_and_covers_the_catalog_slice() {
        let repo = InMemoryProductRepository::default();

        let written = seed(&repo, MarginEndings::Standard).await.expect("seed");
        assert_eq!(written, seed_listings().len() as u64);

        // A second run overwrites by EAN instead of duplicating.
        seed(&repo, MarginEndings::Standard).await.expect("reseed");
        assert_eq!(repo.count().await.expect("count"), written);
    }

    #[tokio::test]
    async fn seeded_products_carry_extracted_specs_and_margin_flags() {
        let repo = InMemoryProductRepository::default();
        seed(&repo, MarginEndings::Standard).await.expect("seed");

        let vivobook = &repo.search("Vivobook").await.expect("search")[0];
        assert_eq!(vivobook.specs.ram_gb, Some(16));
        assert_eq!(vivobook.specs.storage_gb, Some(512));
        assert!(vivobook.is_high_margin, "price 4498 ends on 98");

        let cepter = &repo.search("Cepter").await.expect("search")[0];
        assert!(cepter.is_high_margin);
        assert_eq!(cepter.margin_reason.as_deref(), Some("Cepter brand"));

        let chromebook = &repo.search("Chromebook").await.expect("search")[0];
        assert_eq!(chromebook.specs.cpu_tier, Some(1));
    }
}
