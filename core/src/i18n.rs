use std::fmt;
use std::str::FromStr;
use anyhow::{anyhow, Result};

use crate::model::pricing::{ServiceType, ANY_SIZE};
use crate::model::summary::ServiceKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    Ar,
    En,
}

impl Lang {
    pub fn toggle(self) -> Self {
        match self {
            Lang::Ar => Lang::En,
            Lang::En => Lang::Ar,
        }
    }

    pub fn is_rtl(self) -> bool {
        self == Lang::Ar
    }

    pub fn labels(self) -> &'static Labels {
        match self {
            Lang::Ar => &AR,
            Lang::En => &EN,
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Lang::Ar => "ar",
            Lang::En => "en",
        })
    }
}

impl FromStr for Lang {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ar" | "arabic" => Ok(Lang::Ar),
            "en" | "english" => Ok(Lang::En),
            _ => Err(anyhow!("Unsupported language: '{}'", s)),
        }
    }
}

pub struct Labels {
    pub title: &'static str,
    pub staff: &'static str,
    pub service: &'static str,
    pub size: &'static str,
    pub quantity: &'static str,
    pub add: &'static str,
    pub date: &'static str,
    pub summary: &'static str,
    pub service_summary: &'static str,
    pub total_sales: &'static str,
    pub total_pay: &'static str,
    pub total: &'static str,
    pub small: &'static str,
    pub medium: &'static str,
    pub big: &'static str,
    pub whole: &'static str,
    pub inside: &'static str,
    pub outside: &'static str,
    pub spray: &'static str,
    pub engine: &'static str,
    pub mirrors: &'static str,
    pub carpets: &'static str,
    pub coupon: &'static str,
    pub staff_management: &'static str,
    pub add_staff: &'static str,
    pub remove: &'static str,
    pub clear_data: &'static str,
    pub export_csv: &'static str,
    pub no_data: &'static str,
    pub select_staff: &'static str,
    pub invalid_quantity: &'static str,
    pub staff_exists: &'static str,
    pub confirm_remove: &'static str,
    pub confirm_clear: &'static str,
    pub lang_toggle: &'static str,
}

const AR: Labels = Labels {
    title: "تسجيل مبيعات مغسلة السيارات",
    staff: "الموظف",
    service: "الخدمة",
    size: "الحجم",
    quantity: "العدد",
    add: "إضافة",
    date: "التاريخ",
    summary: "ملخص المبيعات",
    service_summary: "ملخص الخدمات",
    total_sales: "إجمالي المبيعات",
    total_pay: "إجمالي أجر الموظف",
    total: "المجموع",
    small: "صغير",
    medium: "متوسط",
    big: "كبير",
    whole: "غسيل كامل",
    inside: "غسيل داخلي",
    outside: "غسيل خارجي",
    spray: "رش ماء فقط",
    engine: "غسيل المحرك",
    mirrors: "تنظيف المرايا",
    carpets: "تغطية السجاد",
    coupon: "قسيمة",
    staff_management: "إدارة الموظفين",
    add_staff: "إضافة موظف",
    remove: "حذف",
    clear_data: "مسح البيانات",
    export_csv: "تصدير CSV",
    no_data: "لا توجد بيانات",
    select_staff: "اختر موظفًا",
    invalid_quantity: "أدخل عدد صالح",
    staff_exists: "الموظف موجود بالفعل",
    confirm_remove: "حذف",
    confirm_clear: "مسح كل البيانات؟",
    lang_toggle: "English",
};

const EN: Labels = Labels {
    title: "Car Wash Sales Recording",
    staff: "Staff",
    service: "Service",
    size: "Size",
    quantity: "Quantity",
    add: "Add",
    date: "Date",
    summary: "Sales Summary",
    service_summary: "Service Summary",
    total_sales: "Total Sales",
    total_pay: "Total Staff Pay",
    total: "Total",
    small: "Small",
    medium: "Medium",
    big: "Big",
    whole: "Whole Wash",
    inside: "Inside Wash",
    outside: "Outside Wash",
    spray: "Spray Only",
    engine: "Engine Wash",
    mirrors: "Mirror Cleaning",
    carpets: "Carpet Covering",
    coupon: "Coupon",
    staff_management: "Staff Management",
    add_staff: "Add Staff",
    remove: "Remove",
    clear_data: "Clear Data",
    export_csv: "Export CSV",
    no_data: "No data",
    select_staff: "Select a staff member",
    invalid_quantity: "Enter a valid quantity",
    staff_exists: "Staff already exists",
    confirm_remove: "Remove",
    confirm_clear: "Clear all data?",
    lang_toggle: "عربي",
};

impl Labels {
    pub fn service_name(&self, service: ServiceType) -> &'static str {
        match service {
            ServiceType::Whole => self.whole,
            ServiceType::Inside => self.inside,
            ServiceType::Outside => self.outside,
            ServiceType::Spray => self.spray,
            ServiceType::Engine => self.engine,
            ServiceType::Mirrors => self.mirrors,
            ServiceType::Carpets => self.carpets,
            ServiceType::Coupon => self.coupon,
        }
    }

    /// Localized size name; unknown sizes are shown as stored.
    pub fn size_name<'a>(&self, size: &'a str) -> &'a str {
        match size {
            "small" => self.small,
            "medium" => self.medium,
            "big" => self.big,
            ANY_SIZE => "-",
            other => other,
        }
    }

    /// Display text for a service summary column, e.g. `Outside Wash (Big)`.
    pub fn service_key(&self, key: &ServiceKey) -> String {
        let service = key
            .service_type
            .parse::<ServiceType>()
            .map(|s| self.service_name(s).to_string())
            .unwrap_or_else(|_| key.service_type.clone());
        if key.size == ANY_SIZE {
            service
        } else {
            format!("{} ({})", service, self.size_name(&key.size))
        }
    }

    pub fn confirm_remove_staff(&self, name: &str) -> String {
        format!("{} {}?", self.confirm_remove, name)
    }
}
