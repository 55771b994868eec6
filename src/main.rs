use ease_dggs_rs::api::{cell_ids_to_geos, cells_to_children, geos_to_cell_ids};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let lon = -93.26836;
    let lat = 44.97997;

    let response = geos_to_cell_ids(&[(lon, lat)], 3);
    let Some(ids) = response.data else {
        eprintln!("conversion failed: {:?}", response.errors);
        return;
    };
    println!("Cell ID: {}", ids[0]);

    if let Some(centroids) = cell_ids_to_geos(&ids).data {
        println!("Centroid: ({}, {})", centroids[0].0, centroids[0].1);
    }

    if let Some(children) = cells_to_children(&ids, 4).data {
        println!("Children at level 4: {}", children[0].len());
    }
}
