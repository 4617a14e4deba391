//! Effects - side effects declared by the reducer

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Fetch and normalize `/pokemon/{key}`; the result is tagged with `seq`
    FetchCreature { key: String, seq: u64 },
    /// Draw a random id in `1..=catalog_size`
    PickRandom { catalog_size: u32 },
    /// Read the shiny sprite URL for `id`, bypassing the cache
    FetchShinySprite { id: u32 },
    /// Download and decode sprite artwork
    LoadSprite { url: String },
}
