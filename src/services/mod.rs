pub mod duplicates;
pub mod employee;

pub use employee::EmployeeService;
