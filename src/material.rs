pub mod descriptor;
pub mod settle;
