//! Japanese names of constellations, planets and bright stars.

/// Pairs of (English name, Japanese name). First match wins.
const NAMES: &[(&str, &str)] = &[
    ("Andromeda", "アンドロメダ座"),
    ("Monoceros", "いっかくじゅう座"),
    ("Sagittarius", "いて座"),
    ("Delphinus", "いるか座"),
    ("Indus", "インディアン座"),
    ("Pisces", "うお座"),
    ("Lepus", "うさぎ座"),
    ("Bootes", "うしかい座"),
    ("Hydra", "うみへび座"),
    ("Eridanus", "エリダヌス座"),
    ("Taurus", "おうし座"),
    ("Canis Major", "おおいぬ座"),
    ("Lupus", "おおかみ座"),
    ("Ursa Major", "おおぐま座"),
    ("Virgo", "おとめ座"),
    ("Aries", "おひつじ座"),
    ("Orion", "オリオン座"),
    ("Pictor", "がか座"),
    ("Cassiopeia", "カシオペヤ座"),
    ("Dorado", "かじき座"),
    ("Cancer", "かに座"),
    ("Coma Berenices", "かみのけ座"),
    ("Chamaeleon", "カメレオン座"),
    ("Corvus", "からす座"),
    ("Corona Borealis", "かんむり座"),
    ("Tucana", "きょしちょう座"),
    ("Auriga", "ぎょしゃ座"),
    ("Camelopardalis", "きりん座"),
    ("Pavo", "くじゃく座"),
    ("Cetus", "くじら座"),
    ("Cepheus", "ケフェウス座"),
    ("Centaurus", "ケンタウルス座"),
    ("Microscopium", "けんびきょう座"),
    ("Canis Minor", "こいぬ座"),
    ("Equuleus", "こうま座"),
    ("Vulpecula", "こぎつね座"),
    ("Ursa Minor", "こぐま座"),
    ("Leo Minor", "こじし座"),
    ("Crater", "コップ座"),
    ("Lyra", "こと座"),
    ("Circinus", "コンパス座"),
    ("Ara", "さいだん座"),
    ("Scorpius", "さそり座"),
    ("Triangulum", "さんかく座"),
    ("Leo", "しし座"),
    ("Norma", "じょうぎ座"),
    ("Scutum", "たて座"),
    ("Caelum", "ちょうこくぐ座"),
    ("Sculptor", "ちょうこくしつ座"),
    ("Grus", "つる座"),
    ("Mensa", "テーブルさん座"),
    ("Libra", "てんびん座"),
    ("Lacerta", "とかげ座"),
    ("Horologium", "とけい座"),
    ("Volans", "とびうお座"),
    ("Puppis", "とも座"),
    ("Musca", "はえ座"),
    ("Cygnus", "はくちょう座"),
    ("Octans", "はちぶんぎ座"),
    ("Columba", "はと座"),
    ("Apus", "ふうちょう座"),
    ("Gemini", "ふたご座"),
    ("Pegasus", "ペガスス座"),
    ("Serpens", "へび座"),
    ("Ophiuchus", "へびつかい座"),
    ("Hercules", "ヘルクレス座"),
    ("Perseus", "ペルセウス座"),
    ("Vela", "ほ座"),
    ("Telescopium", "ぼうえんきょう座"),
    ("Phoenix", "ほうおう座"),
    ("Antlia", "ポンプ座"),
    ("Aquarius", "みずがめ座"),
    ("Hydrus", "みずへび座"),
    ("Crux", "みなみじゅうじ座"),
    ("Piscis Austrinus", "みなみのうお座"),
    ("Corona Australis", "みなみのかんむり座"),
    ("Triangulum Australe", "みなみのさんかく座"),
    ("Sagitta", "や座"),
    ("Capricornus", "やぎ座"),
    ("Lynx", "やまねこ座"),
    ("Pyxis", "らしんばん座"),
    ("Draco", "りゅう座"),
    ("Carina", "りゅうこつ座"),
    ("Canes Venatici", "りょうけん座"),
    ("Reticulum", "レチクル座"),
    ("Fornax", "ろ座"),
    ("Sextans", "ろくぶんぎ座"),
    ("Aquila", "わし座"),
    ("Sun", "太陽"),
    ("Moon", "月"),
    ("Mercury", "水星"),
    ("Venus", "金星"),
    ("Earth", "地球"),
    ("Mars", "火星"),
    ("Jupiter", "木星"),
    ("Saturn", "土星"),
    ("Uranus", "天王星"),
    ("Neptune", "海王星"),
    ("Pluto", "冥王星"),
    ("Sirius", "シリウス"),
    ("Canopus", "カノープス"),
    ("Arcturus", "アークトゥルス"),
    ("Rigil", "リギル"),
    ("Kentaurus", "ケンタウルス"),
    ("Vega", "ベガ"),
    ("Capella", "カペラ"),
    ("Rigel", "リゲル"),
    ("Procyon", "プロキオン"),
    ("Betelgeuse", "ベテルギウス"),
    ("Achernar", "アケルナル"),
    ("Hadar", "ハダル"),
    ("Acrux", "アクルックス"),
    ("Altair", "アルタイル"),
    ("Aldebaran", "アルデバラン"),
    ("Capella", "カペラ"),
    ("Antares", "アンタレス"),
    ("Spica", "スピカ"),
    ("Pollux", "ポルックス"),
    ("Fomalhaut", "フォーマルハウト"),
    ("Deneb", "デネブ"),
    ("Mimosa", "ミモザ"),
    ("Toliman", "トリマン"),
    ("Regulus", "レグルス"),
    ("Adara", "アダーラ"),
    ("Castor", "カストル"),
    ("Shaula", "シャウラ"),
    ("Gacrux", "ガクルックス"),
    ("Bellatrix", "ベラトリックス"),
    ("Elnath", "エルナト"),
    ("Miaplacidus", "ミアプラキドゥス"),
    ("Alnilam", "アルニラム"),
    ("Alioth", "アリオト"),
    ("Alnitak", "アルニタク"),
    ("Dubhe", "ドゥーベ"),
    ("Mirfak", "ミルファク"),
    ("Wezen", "ウェズン"),
    ("Kaus", "カウス"),
    ("Australis", "アウストラリス"),
    ("Alkaid", "アルカイド"),
    ("Sargas", "サルガス"),
    ("Menkalinan", "メンカリナン"),
    ("Peacock", "ピーコック"),
    ("Alhena", "アルヘナ"),
    ("Atria", "アトリア"),
    ("Alsephina", "Alsephina"),
    ("Avior", "アヴィオール"),
    ("Murzim", "ミルザム"),
    ("Alphard", "アルファルド"),
    ("Hamal", "ハマル"),
    ("Diphda", "ディフダ"),
    ("Polaris", "ポラリス"),
    ("Menkent", "メンケント"),
    ("Mirach", "ミラク"),
    ("Saiph", "サイフ"),
    ("Alpheratz", "アルフェラッツ"),
    ("Nunki", "ヌンキ"),
    ("Rasalhague", "ラス・アルハゲ"),
    ("Kochab", "コカブ"),
    ("Almach", "アルマク"),
    ("Tiaki", "Tiaki"),
    ("Algol", "アルゴル"),
    ("Denebola", "デネボラ"),
    ("Muhlifain", "ムリファイン"),
    ("Suhail", "スハイル"),
    ("Etamin", "エルタニン"),
    ("Schedar", "シェダル"),
    ("Sadr", "サドル"),
    ("Alphecca", "アルフェッカ"),
    ("Naos", "ナオス"),
    ("Aspidiske", "アスピディスケ"),
    ("Mizar", "ミザール"),
    ("Caph", "カフ"),
    ("Larawag", "Larawag"),
    ("Dschubba", "ジュバ"),
    ("Merak", "メラク"),
    ("Algieba", "アルギエバ"),
    ("Ankaa", "アンカア"),
    ("Girtab", "ギルタブ"),
    ("Izar", "イザール"),
    ("Enif", "エニフ"),
    ("Mintaka", "ミンタカ"),
    ("Scheat", "シェアト"),
    ("Sabik", "サビク"),
    ("Phecda", "フェクダ"),
    ("Aludra", "アルドラ"),
    ("Alderamin", "アルデラミン"),
    ("Adhara", "アダラ"),
    ("Markab", "マルカブ"),
    ("Aljanah", "アルジェナー"),
    ("Nebula", "星雲"),
    ("Pleiades", "プレアデス星団"),
];

/// Japanese name for `name`, if the table has one.
pub fn to_japanese(name: &str) -> Option<&'static str> {
    NAMES.iter().find(|(en, _)| *en == name).map(|(_, ja)| *ja)
}
