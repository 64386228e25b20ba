/// Block-type token stored per occupied cell.
///
/// The demo only has one block, drawn with the texture loaded at startup.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Block {
    #[default]
    Textured = 1,
}
