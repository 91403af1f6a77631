//! Single lookup table per status enum, shared by every page.

use serde::Serialize;

use crate::domain::certificate::CertificateStatus;
use crate::domain::notification::NotificationKind;
use crate::domain::partnership::PartnershipStatus;
use crate::domain::request::RequestStatus;
use crate::domain::task::{TaskPriority, TaskStatus};

/// Visual style, mapped onto Bootstrap badge classes by the templates.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BadgeVariant {
    Primary,
    Secondary,
    Outline,
    Success,
    Warning,
    Danger,
    Muted,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Badge {
    pub label: &'static str,
    pub icon: &'static str,
    pub variant: BadgeVariant,
}

const fn badge(label: &'static str, icon: &'static str, variant: BadgeVariant) -> Badge {
    Badge {
        label,
        icon,
        variant,
    }
}

pub trait Badged {
    fn badge(&self) -> Badge;
}

impl Badged for CertificateStatus {
    fn badge(&self) -> Badge {
        match self {
            CertificateStatus::InProgress => badge("В процессе", "bi-clock", BadgeVariant::Primary),
            CertificateStatus::AwaitingPayment => {
                badge("Ждём оплату", "bi-credit-card", BadgeVariant::Outline)
            }
            CertificateStatus::OnReview => {
                badge("На проверке", "bi-file-earmark-check", BadgeVariant::Secondary)
            }
            CertificateStatus::Completed => badge("Завершено", "bi-check2", BadgeVariant::Success),
            CertificateStatus::Rejected => badge("Отклонён", "bi-slash-circle", BadgeVariant::Danger),
        }
    }
}

impl Badged for TaskStatus {
    fn badge(&self) -> Badge {
        match self {
            TaskStatus::New => badge("Новая", "bi-plus-lg", BadgeVariant::Outline),
            TaskStatus::InProgress => badge("В работе", "bi-clock", BadgeVariant::Primary),
            TaskStatus::Waiting => badge("Ожидание", "bi-pause", BadgeVariant::Secondary),
            TaskStatus::OnReview => badge("На проверке", "bi-eye", BadgeVariant::Secondary),
            TaskStatus::Completed => badge("Завершена", "bi-check-circle", BadgeVariant::Success),
            TaskStatus::Cancelled => badge("Отменена", "bi-x-circle", BadgeVariant::Danger),
            TaskStatus::Frozen => badge("Заморожена", "bi-snow", BadgeVariant::Outline),
        }
    }
}

impl Badged for TaskPriority {
    fn badge(&self) -> Badge {
        match self {
            TaskPriority::Urgent => {
                badge("Срочный", "bi-exclamation-triangle", BadgeVariant::Danger)
            }
            TaskPriority::High => badge("Высокий", "bi-arrow-up", BadgeVariant::Warning),
            TaskPriority::Normal => badge("Обычный", "bi-dash", BadgeVariant::Muted),
        }
    }
}

impl Badged for RequestStatus {
    fn badge(&self) -> Badge {
        match self {
            RequestStatus::Pending => badge("Ожидает", "bi-hourglass-split", BadgeVariant::Warning),
            RequestStatus::Accepted => badge("Принята", "bi-check2", BadgeVariant::Success),
            RequestStatus::Rejected => badge("Отклонена", "bi-x-lg", BadgeVariant::Danger),
        }
    }
}

impl Badged for PartnershipStatus {
    fn badge(&self) -> Badge {
        match self {
            PartnershipStatus::Pending => {
                badge("Ожидает", "bi-hourglass-split", BadgeVariant::Warning)
            }
            PartnershipStatus::Accepted => badge("Партнёр", "bi-handshake", BadgeVariant::Success),
            PartnershipStatus::Rejected => badge("Отклонено", "bi-x-lg", BadgeVariant::Danger),
        }
    }
}

impl Badged for NotificationKind {
    fn badge(&self) -> Badge {
        match self {
            NotificationKind::Info => badge("Информация", "bi-info-circle", BadgeVariant::Primary),
            NotificationKind::Success => badge("Успех", "bi-check-circle", BadgeVariant::Success),
            NotificationKind::Warning => {
                badge("Внимание", "bi-exclamation-circle", BadgeVariant::Warning)
            }
            NotificationKind::Error => badge("Ошибка", "bi-x-octagon", BadgeVariant::Danger),
        }
    }
}

/// Full table of an enum, used to render filter dropdowns.
pub fn legend<T: Badged + Copy>(values: &[T]) -> Vec<(T, Badge)> {
    values.iter().map(|value| (*value, value.badge())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urgent_priority_is_danger() {
        let badge = TaskPriority::Urgent.badge();
        assert_eq!(badge.label, "Срочный");
        assert_eq!(badge.variant, BadgeVariant::Danger);
    }

    #[test]
    fn every_certificate_status_has_a_distinct_label() {
        let labels: Vec<_> = legend(&CertificateStatus::ALL)
            .into_iter()
            .map(|(_, badge)| badge.label)
            .collect();
        let mut unique = labels.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(labels.len(), unique.len());
    }
}
