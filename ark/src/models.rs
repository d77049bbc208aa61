//! Model constants and predefined values for the Ark API.

// ==================== Image Models ====================

/// Seedream 4.0, image generation with coherent multi-image batches.
pub const MODEL_SEEDREAM_4: &str = "seedream-4-0-250828";

/// Seedream 3.0 text-to-image.
pub const MODEL_SEEDREAM_3: &str = "seedream-3-0-t2i-250415";

/// SeedEdit 3.0, image editing from a reference image.
pub const MODEL_SEEDEDIT_3: &str = "seededit-3-0-i2i-250628";

// ==================== Image Sizes ====================

pub const SIZE_1K: &str = "1K";
pub const SIZE_2K: &str = "2K";
pub const SIZE_4K: &str = "4K";
