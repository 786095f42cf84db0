//! Built-in network: railway stations and lines around Zhanjiang, Guangdong.
//!
//! Station positions are surveyed locations. Lines join stations in order and do
//! not follow the real track alignment.

pub struct StationRecord {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
    pub address: &'static str,
    pub phone: &'static str,
}

pub struct RouteRecord {
    pub id: u32,
    pub name: &'static str,
    pub path: &'static [&'static str],
    pub stations: &'static [&'static str],
}

pub const STATIONS: &[StationRecord] = &[
    StationRecord {
        name: "湛江站",
        lat: 21.192514,
        lon: 110.393996,
        address: "湛江市霞山区解放西路40号",
        phone: "(0759)12306",
    },
    StationRecord {
        name: "湛江北站",
        lat: 21.223748,
        lon: 110.362123,
        address: "广东省湛江市霞山区海头街道西厅村",
        phone: "(0759)12306",
    },
    StationRecord {
        name: "湛江西站",
        lat: 21.249186,
        lon: 110.294987,
        address: "广东省湛江市麻章区上塘村",
        phone: "(0759)12306",
    },
    StationRecord {
        name: "徐闻站",
        lat: 20.352062,
        lon: 110.151946,
        address: "广东省湛江市徐闻县木兰大道",
        phone: "(0759)12306",
    },
    StationRecord {
        name: "廉江站",
        lat: 21.622313,
        lon: 110.303976,
        address: "湛江市廉江市东环四路",
        phone: "(0759)6552671",
    },
    StationRecord {
        name: "河唇站",
        lat: 21.701727,
        lon: 110.307948,
        address: "广东省湛江市廉江市河唇镇五一路",
        phone: "(0759)12306",
    },
    StationRecord {
        name: "雷州站",
        lat: 20.925462,
        lon: 110.052287,
        address: "广东省湛江市雷州市新城大道",
        phone: "(0759)12306",
    },
    StationRecord {
        name: "遂溪站",
        lat: 21.404848,
        lon: 110.273477,
        address: "湛江市遂溪县文仓路18号",
        phone: "(0759)12306",
    },
    StationRecord {
        name: "塘缀站",
        lat: 21.453928,
        lon: 110.572845,
        address: "广东省湛江市吴川市塘缀镇山路村大道塘缀火车站",
        phone: "(0759)12306",
    },
    StationRecord {
        name: "雷州龙门站",
        lat: 20.72035,
        lon: 110.015216,
        address: "广东省湛江市雷州市龙门镇雷州龙门站",
        phone: "(0759)12306",
    },
];

pub const ROUTES: &[RouteRecord] = &[
    RouteRecord {
        id: 1,
        name: "黎湛铁路",
        path: &["河唇站", "廉江站", "遂溪站", "湛江西站 (x)", "湛江站"],
        stations: &["河唇站", "廉江站", "遂溪站", "湛江站"],
    },
    RouteRecord {
        id: 2,
        name: "粤海铁路",
        path: &["湛江西站", "雷州站", "雷州龙门站 (x)", "徐闻站", "海安南站"],
        stations: &["湛江西站", "雷州站", "徐闻站", "海安南站"],
    },
    RouteRecord {
        id: 3,
        name: "深湛铁路",
        path: &["茂名站", "吴川站", "塘缀站 (x)", "湛江北站", "湛江西站"],
        stations: &["茂名站", "吴川站", "湛江北站", "湛江西站"],
    },
    RouteRecord {
        id: 4,
        name: "广湛高铁",
        path: &["广州站", "茂名站", "吴川站", "湛江北站 (x)", "湛江西站"],
        stations: &["广州站", "茂名站", "吴川站", "湛江北站", "湛江西站"],
    },
    RouteRecord {
        id: 5,
        name: "河茂铁路",
        path: &["河唇站", "石岭站 (x)", "茂名站"],
        stations: &["河唇站", "石岭站", "茂名站"],
    },
];
