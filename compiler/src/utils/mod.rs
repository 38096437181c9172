mod flex_map;

pub use flex_map::FlexMap;
