mod serial_caster;

pub use serial_caster::{SerialCaster, SerialCasterTrait};
