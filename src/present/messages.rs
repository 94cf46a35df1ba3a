// Display strings. The app ships a single locale (ja).

use crate::fuel::{MessageKey, RateTier};
use crate::vehicle::models::{Category, Powertrain};

const CATEGORY_NAMES: [(Category, &str); 6] = [
    (Category::Compact, "コンパクトカー"),
    (Category::Sedan, "セダン・ハッチバック"),
    (Category::Suv, "SUV"),
    (Category::Minivan, "ミニバン"),
    (Category::Sports, "スポーツカー"),
    (Category::Kei, "軽自動車"),
];

const POWERTRAIN_NAMES: [(Powertrain, &str); 5] = [
    (Powertrain::Gasoline, "ガソリン"),
    (Powertrain::Hev, "ハイブリッド (HEV)"),
    (Powertrain::Phev, "プラグインハイブリッド (PHEV)"),
    (Powertrain::Diesel, "ディーゼル"),
    (Powertrain::Lpg, "LPG"),
];

/// Used when a category is not known to the table
pub const FALLBACK_CATEGORY_NAME: &str = "お車";

pub fn category_name(category: Category) -> &'static str {
    CATEGORY_NAMES
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, name)| *name)
        .unwrap_or(FALLBACK_CATEGORY_NAME)
}

/// Display name for a raw tag, falling back for unknown input
pub fn category_name_for_tag(tag: &str) -> &'static str {
    tag.parse::<Category>()
        .map(category_name)
        .unwrap_or(FALLBACK_CATEGORY_NAME)
}

pub fn powertrain_name(powertrain: Powertrain) -> &'static str {
    POWERTRAIN_NAMES
        .iter()
        .find(|(p, _)| *p == powertrain)
        .map(|(_, name)| *name)
        .unwrap_or("")
}

pub fn message_text(key: &MessageKey) -> String {
    match key {
        MessageKey::ElectrifiedExceeded(category) => format!(
            "最新の電動化技術が光る{}ですね！2030年度基準も余裕でクリアです。",
            category_name(*category)
        ),
        MessageKey::CombustionExceeded => {
            "ガソリン車・ディーゼル車でありながら基準クリア！驚異的な燃費性能です。".to_string()
        }
        MessageKey::Sports(RateTier::Low) => {
            "走る楽しさやロマンが詰まった一台！エコドライブを意識できれば完璧ですね。".to_string()
        }
        MessageKey::Sports(_) => {
            "走りの楽しさとエコを両立した、本当に素晴らしいスポーツカーですね！".to_string()
        }
        MessageKey::Large(RateTier::Low) => {
            "大きくパワフルなお車ですね！休日のレジャーや旅行に大活躍してくれる相棒です。"
                .to_string()
        }
        MessageKey::Large(_) => {
            "大きくて重いボディなのにこれだけ優秀なのは、パワートレインの恩恵ですね！".to_string()
        }
        MessageKey::LightAndNimble => {
            "軽くて小回りのきく、日常生活の強い味方ですね！維持費も優しく機能的なお車です。"
                .to_string()
        }
        MessageKey::GenericHigh => {
            "かなり優秀な燃費です！バランスの取れた素晴らしいお車ですね。".to_string()
        }
        MessageKey::GenericBalanced => {
            "通勤やお出かけに活躍する、バランスの良いおなじみのお車ですね！".to_string()
        }
    }
}
