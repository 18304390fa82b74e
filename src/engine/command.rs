/// Device-independent inputs the game understands; the interface maps
/// keys and window events onto these.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    RotateClockwise,
    Hold,
    Quit,
}
