//! Role-to-permission mapping definitions.
//!
//! The table is compiled-in and immutable: it is read on every privileged
//! request and changes only with deployment, so it is configuration at
//! build time, not data.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use clinichub_core::error::AppError;
use clinichub_entity::user::UserRole;

/// A named capability, rendered as a dotted string (`patient.create`).
///
/// Matching is exact: no wildcards, no hierarchy. Every permission a role
/// needs must be enumerated in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    // User management
    /// Create new users.
    UserCreate,
    /// Read user profiles.
    UserRead,
    /// Update user details.
    UserUpdate,
    /// Delete users.
    UserDelete,

    // Clinic administration
    /// Manage clinic settings and staff.
    ClinicManage,
    /// View clinic reports and statistics.
    ReportsView,
    /// Manage application settings.
    SettingsManage,

    // Patients
    /// Register patient records.
    PatientCreate,
    /// Read patient records.
    PatientRead,
    /// Update patient records.
    PatientUpdate,

    // Appointments
    /// Book appointments.
    AppointmentCreate,
    /// View appointments.
    AppointmentRead,
    /// Reschedule or edit appointments.
    AppointmentUpdate,
    /// Full appointment control (book, edit, cancel).
    AppointmentManage,

    // Prescriptions
    /// Write prescriptions.
    PrescriptionCreate,
    /// View prescriptions.
    PrescriptionRead,
    /// Dispense against prescriptions.
    PrescriptionFulfill,

    // Medical records
    /// Write medical record entries.
    MedicalRecordCreate,
    /// Read medical record entries.
    MedicalRecordRead,

    // Lab
    /// Order lab tests.
    LabTestCreate,
    /// Update lab test status.
    LabTestUpdate,
    /// Enter lab results.
    LabResultCreate,
    /// View lab results.
    LabResultRead,

    // Medication
    /// Administer medication to patients.
    MedicationAdminister,
    /// Manage medication inventory.
    MedicationManage,

    // Self-service
    /// Update own profile.
    ProfileUpdate,
}

impl Permission {
    /// The dotted wire string for this permission.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserCreate => "user.create",
            Self::UserRead => "user.read",
            Self::UserUpdate => "user.update",
            Self::UserDelete => "user.delete",
            Self::ClinicManage => "clinic.manage",
            Self::ReportsView => "reports.view",
            Self::SettingsManage => "settings.manage",
            Self::PatientCreate => "patient.create",
            Self::PatientRead => "patient.read",
            Self::PatientUpdate => "patient.update",
            Self::AppointmentCreate => "appointment.create",
            Self::AppointmentRead => "appointment.read",
            Self::AppointmentUpdate => "appointment.update",
            Self::AppointmentManage => "appointment.manage",
            Self::PrescriptionCreate => "prescription.create",
            Self::PrescriptionRead => "prescription.read",
            Self::PrescriptionFulfill => "prescription.fulfill",
            Self::MedicalRecordCreate => "medical_record.create",
            Self::MedicalRecordRead => "medical_record.read",
            Self::LabTestCreate => "lab_test.create",
            Self::LabTestUpdate => "lab_test.update",
            Self::LabResultCreate => "lab_result.create",
            Self::LabResultRead => "lab_result.read",
            Self::MedicationAdminister => "medication.administer",
            Self::MedicationManage => "medication.manage",
            Self::ProfileUpdate => "profile.update",
        }
    }

    /// Every defined permission, for table-driven tests.
    pub const ALL: [Permission; 26] = [
        Self::UserCreate,
        Self::UserRead,
        Self::UserUpdate,
        Self::UserDelete,
        Self::ClinicManage,
        Self::ReportsView,
        Self::SettingsManage,
        Self::PatientCreate,
        Self::PatientRead,
        Self::PatientUpdate,
        Self::AppointmentCreate,
        Self::AppointmentRead,
        Self::AppointmentUpdate,
        Self::AppointmentManage,
        Self::PrescriptionCreate,
        Self::PrescriptionRead,
        Self::PrescriptionFulfill,
        Self::MedicalRecordCreate,
        Self::MedicalRecordRead,
        Self::LabTestCreate,
        Self::LabTestUpdate,
        Self::LabResultCreate,
        Self::LabResultRead,
        Self::MedicationAdminister,
        Self::MedicationManage,
        Self::ProfileUpdate,
    ];
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .iter()
            .find(|p| p.as_str() == s)
            .copied()
            .ok_or_else(|| AppError::validation(format!("Unknown permission: {s}")))
    }
}

/// The fixed role → allowed-permission mapping.
#[derive(Debug, Clone)]
pub struct PermissionTable {
    /// Role → set of permissions.
    table: HashMap<UserRole, HashSet<Permission>>,
}

impl PermissionTable {
    /// Creates the compiled-in table.
    pub fn new() -> Self {
        use Permission::*;

        let mut table = HashMap::new();

        table.insert(
            UserRole::Admin,
            HashSet::from([
                UserCreate,
                UserRead,
                UserUpdate,
                UserDelete,
                ClinicManage,
                ReportsView,
                SettingsManage,
            ]),
        );

        table.insert(
            UserRole::Doctor,
            HashSet::from([
                PatientRead,
                PatientUpdate,
                AppointmentManage,
                PrescriptionCreate,
                MedicalRecordCreate,
                MedicalRecordRead,
                LabResultRead,
            ]),
        );

        table.insert(
            UserRole::Nurse,
            HashSet::from([
                PatientRead,
                PatientUpdate,
                AppointmentRead,
                MedicalRecordRead,
                MedicationAdminister,
            ]),
        );

        table.insert(
            UserRole::LabTech,
            HashSet::from([LabTestCreate, LabTestUpdate, LabResultCreate, PatientRead]),
        );

        table.insert(
            UserRole::Patient,
            HashSet::from([
                AppointmentCreate,
                AppointmentRead,
                MedicalRecordRead,
                PrescriptionRead,
                ProfileUpdate,
            ]),
        );

        table.insert(
            UserRole::Receptionist,
            HashSet::from([
                AppointmentCreate,
                AppointmentRead,
                AppointmentUpdate,
                PatientCreate,
                PatientRead,
            ]),
        );

        table.insert(
            UserRole::Pharmacist,
            HashSet::from([
                PrescriptionRead,
                PrescriptionFulfill,
                MedicationManage,
                PatientRead,
            ]),
        );

        Self { table }
    }

    /// Exact-match lookup. Unknown roles (impossible with the closed enum)
    /// and unlisted permissions both deny.
    pub fn allows(&self, role: &UserRole, permission: &Permission) -> bool {
        self.table
            .get(role)
            .map(|set| set.contains(permission))
            .unwrap_or(false)
    }

    /// The permission set for one role.
    pub fn permissions_for(&self, role: &UserRole) -> &HashSet<Permission> {
        static EMPTY: std::sync::OnceLock<HashSet<Permission>> = std::sync::OnceLock::new();
        self.table
            .get(role)
            .unwrap_or_else(|| EMPTY.get_or_init(HashSet::new))
    }
}

impl Default for PermissionTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_strings_round_trip() {
        for p in Permission::ALL {
            assert_eq!(p.as_str().parse::<Permission>().unwrap(), p);
        }
        assert!("patient.destroy".parse::<Permission>().is_err());
    }

    /// Full role × permission matrix from the product definition.
    #[test]
    fn test_full_matrix() {
        use Permission::*;
        use UserRole::*;

        let expected: &[(UserRole, &[Permission])] = &[
            (
                Admin,
                &[
                    UserCreate, UserRead, UserUpdate, UserDelete, ClinicManage, ReportsView,
                    SettingsManage,
                ],
            ),
            (
                Doctor,
                &[
                    PatientRead, PatientUpdate, AppointmentManage, PrescriptionCreate,
                    MedicalRecordCreate, MedicalRecordRead, LabResultRead,
                ],
            ),
            (
                Nurse,
                &[
                    PatientRead, PatientUpdate, AppointmentRead, MedicalRecordRead,
                    MedicationAdminister,
                ],
            ),
            (LabTech, &[LabTestCreate, LabTestUpdate, LabResultCreate, PatientRead]),
            (
                Patient,
                &[
                    AppointmentCreate, AppointmentRead, MedicalRecordRead, PrescriptionRead,
                    ProfileUpdate,
                ],
            ),
            (
                Receptionist,
                &[
                    AppointmentCreate, AppointmentRead, AppointmentUpdate, PatientCreate,
                    PatientRead,
                ],
            ),
            (
                Pharmacist,
                &[PrescriptionRead, PrescriptionFulfill, MedicationManage, PatientRead],
            ),
        ];

        let table = PermissionTable::new();
        for (role, allowed) in expected {
            for p in Permission::ALL {
                let should = allowed.contains(&p);
                assert_eq!(
                    table.allows(role, &p),
                    should,
                    "role {role} permission {p}: expected {should}"
                );
            }
        }
    }

    #[test]
    fn test_patients_cannot_create_patient_records_but_receptionists_can() {
        let table = PermissionTable::new();
        assert!(!table.allows(&UserRole::Patient, &Permission::PatientCreate));
        assert!(table.allows(&UserRole::Receptionist, &Permission::PatientCreate));
    }
}
