//! Customs declarations, their vehicles and groups.

use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    ClientId, CompanyId, DeclarationId, DeclarationNumber, DocumentId, FolderId, GroupId,
    GroupName, Note, PostNumber, TypeConstraintError, UserId, VehicleNumber,
};

/// Date layout used inside the formatted declaration number.
pub const DECLARATION_DATE_FORMAT: &str = "%d.%m.%Y";

macro_rules! declaration_modes {
    ($($variant:ident => $code:literal),+ $(,)?) => {
        /// Customs procedure code of a declaration.
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub enum DeclarationMode {
            $(
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl DeclarationMode {
            /// Every procedure code in the order offered by the mode selector.
            pub const ALL: &'static [DeclarationMode] = &[$(DeclarationMode::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(DeclarationMode::$variant => $code,)+
                }
            }
        }

        impl FromStr for DeclarationMode {
            type Err = TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($code => Ok(DeclarationMode::$variant),)+
                    other => Err(TypeConstraintError::InvalidValue(format!(
                        "unknown declaration mode `{other}`"
                    ))),
                }
            }
        }
    };
}

declaration_modes! {
    Ek10 => "ЭК/10",
    Ek11 => "ЭК/11",
    Ek12 => "ЭК/12",
    Im40 => "ИМ/40",
    Im41 => "ИМ/41",
    Im42 => "ИМ/42",
    Im51 => "ИМ/51",
    Ek51 => "ЭК/51",
    Ek61 => "ЭК/61",
    Im61 => "ИМ/61",
    Im70 => "ИМ/70",
    Im71 => "ИМ/71",
    Ek71 => "ЭК/71",
    Im72 => "ИМ/72",
    Ek72 => "ЭК/72",
    Im73 => "ИМ/73",
    Ek73 => "ЭК/73",
    Im74 => "ИМ/74",
    Ek74 => "ЭК/74",
    Im75 => "ИМ/75",
    Ek75 => "ЭК/75",
    Im76 => "ИМ/76",
    Tr80 => "ТР/80",
    Nd40 => "НД/40",
    Pr40 => "ПР/40",
    Pe40 => "ПЕ/40",
    Vd40 => "ВД/40",
    Vd10 => "ВД/10",
    Vd74 => "ВД/74",
}

impl Display for DeclarationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport kind, identified by its two-digit customs code.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum VehicleType {
    #[serde(rename = "10")]
    Marine,
    #[serde(rename = "20")]
    Railway,
    #[default]
    #[serde(rename = "30")]
    Auto,
    #[serde(rename = "40")]
    Air,
    #[serde(rename = "71")]
    Pipeline,
    #[serde(rename = "72")]
    PowerLine,
    #[serde(rename = "80")]
    River,
    #[serde(rename = "90")]
    SelfPropelled,
}

impl VehicleType {
    pub const ALL: [VehicleType; 8] = [
        VehicleType::Marine,
        VehicleType::Railway,
        VehicleType::Auto,
        VehicleType::Air,
        VehicleType::Pipeline,
        VehicleType::PowerLine,
        VehicleType::River,
        VehicleType::SelfPropelled,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            VehicleType::Marine => "10",
            VehicleType::Railway => "20",
            VehicleType::Auto => "30",
            VehicleType::Air => "40",
            VehicleType::Pipeline => "71",
            VehicleType::PowerLine => "72",
            VehicleType::River => "80",
            VehicleType::SelfPropelled => "90",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VehicleType::Marine => "МОРСКОЙ",
            VehicleType::Railway => "ЖД",
            VehicleType::Auto => "АВТО",
            VehicleType::Air => "АВИА",
            VehicleType::Pipeline => "ТРУБОПРОВОД",
            VehicleType::PowerLine => "ЛЭП",
            VehicleType::River => "РЕЧНОЙ",
            VehicleType::SelfPropelled => "САМОХОД",
        }
    }
}

impl FromStr for VehicleType {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        VehicleType::ALL
            .into_iter()
            .find(|kind| kind.code() == code)
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("unknown vehicle type `{code}`")))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Vehicle {
    pub number: VehicleNumber,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
}

impl Vehicle {
    /// Builds a vehicle row, upper-casing the plate number.
    pub fn new(number: &str, vehicle_type: VehicleType) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            number: VehicleNumber::new(number.to_uppercase())?,
            vehicle_type,
        })
    }
}

/// The three pieces of the canonical declaration number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclarationNumberParts {
    pub post_number: PostNumber,
    pub date: NaiveDate,
    pub declaration_number: DeclarationNumber,
}

impl DeclarationNumberParts {
    /// Renders `{post}/{dd.mm.yyyy}/{number}`, e.g. `26001/22.12.2025/0010722`.
    pub fn format(&self) -> String {
        format!(
            "{}/{}/{}",
            self.post_number,
            self.date.format(DECLARATION_DATE_FORMAT),
            self.declaration_number
        )
    }

    /// Splits a formatted number back into validated parts.
    pub fn parse(value: &str) -> Result<Self, TypeConstraintError> {
        let mut parts = value.trim().split('/');
        let (Some(post), Some(date), Some(number), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TypeConstraintError::InvalidValue(format!(
                "malformed declaration number `{value}`"
            )));
        };

        let date = NaiveDate::parse_from_str(date, DECLARATION_DATE_FORMAT).map_err(|_| {
            TypeConstraintError::InvalidValue(format!("malformed declaration date `{date}`"))
        })?;

        Ok(Self {
            post_number: PostNumber::new(post)?,
            date,
            declaration_number: DeclarationNumber::new(number)?,
        })
    }
}

impl Display for DeclarationNumberParts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Declaration {
    pub id: DeclarationId,
    pub post_number: PostNumber,
    pub date: NaiveDate,
    pub declaration_number: DeclarationNumber,
    pub client_id: ClientId,
    pub mode: DeclarationMode,
    pub vehicles: Vec<Vehicle>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub attached_document_ids: Vec<DocumentId>,
    #[serde(default)]
    pub attached_folder_ids: Vec<FolderId>,
    #[serde(default)]
    pub group_id: Option<GroupId>,
    pub owner_id: UserId,
    pub company_id: CompanyId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Declaration {
    pub fn number_parts(&self) -> DeclarationNumberParts {
        DeclarationNumberParts {
            post_number: self.post_number.clone(),
            date: self.date,
            declaration_number: self.declaration_number.clone(),
        }
    }

    /// Canonical human-readable number, always derived from its parts.
    pub fn formatted_number(&self) -> String {
        self.number_parts().format()
    }
}

/// Payload for creating a declaration.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewDeclaration {
    pub post_number: PostNumber,
    pub date: NaiveDate,
    pub declaration_number: DeclarationNumber,
    pub client_id: ClientId,
    pub mode: DeclarationMode,
    pub vehicles: Vec<Vehicle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Note>,
    pub attached_document_ids: Vec<DocumentId>,
    pub attached_folder_ids: Vec<FolderId>,
}

impl NewDeclaration {
    pub fn number_parts(&self) -> DeclarationNumberParts {
        DeclarationNumberParts {
            post_number: self.post_number.clone(),
            date: self.date,
            declaration_number: self.declaration_number.clone(),
        }
    }
}

/// Partial declaration update. The formatted number is never sent.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDeclaration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_number: Option<PostNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declaration_number: Option<DeclarationNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<DeclarationMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicles: Option<Vec<Vehicle>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Note>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationGroup {
    pub id: GroupId,
    pub name: String,
    #[serde(default)]
    pub declaration_ids: Vec<DeclarationId>,
    pub company_id: CompanyId,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewDeclarationGroup {
    pub name: GroupName,
    pub declaration_ids: Vec<DeclarationId>,
}
