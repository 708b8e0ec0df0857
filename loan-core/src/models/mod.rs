mod applicant_category;
mod application;
mod loan_id;
mod marital_status;

pub use applicant_category::ApplicantCategory;
pub use application::{
    Address, ApplicationRecord, BusinessDetails, EmployeeDetails, IndependentDetails,
    NewApplication, PensionerDetails,
};
pub use loan_id::{
    LOAN_ID_ALPHABET, LOAN_ID_FALLBACK_LEN, LOAN_ID_LEN, LOAN_ID_PREFIX, LoanId, LoanIdError,
};
pub use marital_status::MaritalStatus;
