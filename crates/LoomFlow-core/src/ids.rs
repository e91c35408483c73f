use rand::Rng;

/// A fresh node id: `node_<unix millis>_<random hex>`.
pub fn generate_node_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rng.r#gen();
    format!("node_{millis}_{suffix:08x}")
}

/// Generates ids until one is not `taken`.
pub fn unique_node_id<R, F>(rng: &mut R, taken: F) -> String
where
    R: Rng + ?Sized,
    F: Fn(&str) -> bool,
{
    loop {
        let id = generate_node_id(rng);
        if !taken(&id) {
            return id;
        }
        tracing::debug!(node_id = %id, "Node id collision, re-rolling");
    }
}
