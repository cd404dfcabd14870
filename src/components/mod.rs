pub mod character_card;
pub mod constellation;
pub mod selection_legend;
pub mod trait_panel;
