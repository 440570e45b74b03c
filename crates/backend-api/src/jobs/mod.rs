pub mod repeated_absences;
