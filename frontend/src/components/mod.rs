pub mod sort_menu;
pub mod trip_card;
pub mod trip_form;
pub mod trip_list;
