/// Column names as constants for type safety
/// X position in millimeters
pub const X_MM: &str = "x_mm";
/// Y position in millimeters
pub const Y_MM: &str = "y_mm";
/// Z position in millimeters
pub const Z_MM: &str = "z_mm";
/// X field component in tesla
pub const BX: &str = "Bx";
/// Y field component in tesla
pub const BY: &str = "By";
/// Z field component in tesla
pub const BZ: &str = "Bz";

/// All columns, in table order
pub const ALL: [&str; 6] = [X_MM, Y_MM, Z_MM, BX, BY, BZ];

/// Position columns
pub const POSITION: [&str; 3] = [X_MM, Y_MM, Z_MM];

/// Field columns
pub const FIELD: [&str; 3] = [BX, BY, BZ];
