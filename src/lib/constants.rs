/// value written for cells without a result
pub const NODATAVAL: f32 = -9999.0;
