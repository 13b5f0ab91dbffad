pub mod axis_selection;
