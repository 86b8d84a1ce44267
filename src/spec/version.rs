/// Wire version written into every render spec. Readers reject any other value.
pub const RENDER_SPEC_VERSION: u32 = 1;
